//! Registry of chartable metrics.
//!
//! The charting layer needs a display name, unit, nominal range and colour
//! scale for each column it plots. Rather than ambient global dictionaries,
//! those live in an explicit registry the consumer receives and may override
//! or extend.

use std::collections::HashMap;

/// Presentation metadata for one enriched-table column.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDescriptor {
    pub display_name: &'static str,
    pub unit: &'static str,
    /// Nominal axis range for charts.
    pub range: (f64, f64),
    /// Named colour scale the dashboard resolves.
    pub color_scale: &'static str,
}

/// Mapping from column identifier to its chart descriptor.
#[derive(Debug, Clone, Default)]
pub struct MetricRegistry {
    metrics: HashMap<&'static str, MetricDescriptor>,
}

impl MetricRegistry {
    /// An empty registry; use [`MetricRegistry::canonical`] for the standard
    /// dashboard set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The canonical descriptors for the columns the dashboard charts.
    pub fn canonical() -> Self {
        let mut registry = Self::new();
        let entries = [
            ("DBT", MetricDescriptor { display_name: "Dry bulb temperature", unit: "°C", range: (-40.0, 50.0), color_scale: "Spectral_r" }),
            ("DPT", MetricDescriptor { display_name: "Dew point temperature", unit: "°C", range: (-50.0, 35.0), color_scale: "Spectral_r" }),
            ("RH", MetricDescriptor { display_name: "Relative humidity", unit: "%", range: (0.0, 100.0), color_scale: "GnBu" }),
            ("p_atm", MetricDescriptor { display_name: "Atmospheric pressure", unit: "Pa", range: (95_000.0, 105_000.0), color_scale: "viridis" }),
            ("extr_hor_rad", MetricDescriptor { display_name: "Extraterrestrial horizontal radiation", unit: "Wh/m²", range: (0.0, 1200.0), color_scale: "YlOrRd" }),
            ("hor_ir_rad", MetricDescriptor { display_name: "Horizontal infrared radiation", unit: "Wh/m²", range: (0.0, 500.0), color_scale: "YlOrRd" }),
            ("glob_hor_rad", MetricDescriptor { display_name: "Global horizontal radiation", unit: "Wh/m²", range: (0.0, 1200.0), color_scale: "YlOrRd" }),
            ("dir_nor_rad", MetricDescriptor { display_name: "Direct normal radiation", unit: "Wh/m²", range: (0.0, 1200.0), color_scale: "YlOrRd" }),
            ("dif_hor_rad", MetricDescriptor { display_name: "Diffuse horizontal radiation", unit: "Wh/m²", range: (0.0, 800.0), color_scale: "YlOrRd" }),
            ("glob_hor_ill", MetricDescriptor { display_name: "Global horizontal illuminance", unit: "lux", range: (0.0, 120_000.0), color_scale: "YlOrBr" }),
            ("dir_nor_ill", MetricDescriptor { display_name: "Direct normal illuminance", unit: "lux", range: (0.0, 120_000.0), color_scale: "YlOrBr" }),
            ("dif_hor_ill", MetricDescriptor { display_name: "Diffuse horizontal illuminance", unit: "lux", range: (0.0, 80_000.0), color_scale: "YlOrBr" }),
            ("Zlumi", MetricDescriptor { display_name: "Zenith luminance", unit: "cd/m²", range: (0.0, 10_000.0), color_scale: "YlOrBr" }),
            ("wind_dir", MetricDescriptor { display_name: "Wind direction", unit: "°", range: (0.0, 360.0), color_scale: "twilight" }),
            ("wind_speed", MetricDescriptor { display_name: "Wind speed", unit: "m/s", range: (0.0, 20.0), color_scale: "Blues" }),
            ("tot_sky_cover", MetricDescriptor { display_name: "Total sky cover", unit: "tenths", range: (0.0, 10.0), color_scale: "Greys" }),
            ("Vis", MetricDescriptor { display_name: "Visibility", unit: "km", range: (0.0, 80.0), color_scale: "Greys" }),
            ("elevation", MetricDescriptor { display_name: "Solar elevation", unit: "°", range: (0.0, 90.0), color_scale: "YlOrRd" }),
            ("azimuth", MetricDescriptor { display_name: "Solar azimuth", unit: "°", range: (0.0, 360.0), color_scale: "twilight" }),
            ("MRT", MetricDescriptor { display_name: "Mean radiant temperature", unit: "°C", range: (-40.0, 80.0), color_scale: "Spectral_r" }),
            ("utci_noSun_Wind", MetricDescriptor { display_name: "UTCI, shade and wind", unit: "°C", range: (-40.0, 46.0), color_scale: "Spectral_r" }),
            ("utci_noSun_noWind", MetricDescriptor { display_name: "UTCI, shade and still air", unit: "°C", range: (-40.0, 46.0), color_scale: "Spectral_r" }),
            ("utci_Sun_Wind", MetricDescriptor { display_name: "UTCI, sun and wind", unit: "°C", range: (-40.0, 46.0), color_scale: "Spectral_r" }),
            ("utci_Sun_noWind", MetricDescriptor { display_name: "UTCI, sun and still air", unit: "°C", range: (-40.0, 46.0), color_scale: "Spectral_r" }),
            ("utci_noSun_Wind_categories", MetricDescriptor { display_name: "Thermal stress, shade and wind", unit: "", range: (-5.0, 4.0), color_scale: "RdBu_r" }),
            ("utci_noSun_noWind_categories", MetricDescriptor { display_name: "Thermal stress, shade and still air", unit: "", range: (-5.0, 4.0), color_scale: "RdBu_r" }),
            ("utci_Sun_Wind_categories", MetricDescriptor { display_name: "Thermal stress, sun and wind", unit: "", range: (-5.0, 4.0), color_scale: "RdBu_r" }),
            ("utci_Sun_noWind_categories", MetricDescriptor { display_name: "Thermal stress, sun and still air", unit: "", range: (-5.0, 4.0), color_scale: "RdBu_r" }),
            ("t_wb", MetricDescriptor { display_name: "Wet bulb temperature", unit: "°C", range: (-40.0, 40.0), color_scale: "Spectral_r" }),
            ("t_dp", MetricDescriptor { display_name: "Dew point (derived)", unit: "°C", range: (-50.0, 35.0), color_scale: "Spectral_r" }),
            ("hr", MetricDescriptor { display_name: "Humidity ratio", unit: "kg/kg", range: (0.0, 0.03), color_scale: "GnBu" }),
            ("h", MetricDescriptor { display_name: "Enthalpy", unit: "J/kg", range: (0.0, 110_000.0), color_scale: "GnBu" }),
        ];
        for (id, descriptor) in entries {
            registry.insert(id, descriptor);
        }
        registry
    }

    /// Adds or replaces a descriptor.
    pub fn insert(&mut self, id: &'static str, descriptor: MetricDescriptor) {
        self.metrics.insert(id, descriptor);
    }

    pub fn get(&self, id: &str) -> Option<&MetricDescriptor> {
        self.metrics.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.metrics.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.metrics.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_registry_covers_the_charted_families() {
        let registry = MetricRegistry::canonical();
        for id in [
            "DBT",
            "RH",
            "wind_speed",
            "wind_dir",
            "glob_hor_rad",
            "utci_Sun_Wind",
            "utci_Sun_Wind_categories",
            "t_wb",
        ] {
            assert!(registry.contains(id), "missing descriptor for {id}");
        }
    }

    #[test]
    fn wind_naming_is_reconciled() {
        let registry = MetricRegistry::canonical();
        assert!(registry.contains("wind_speed"));
        assert!(registry.contains("wind_dir"));
        assert!(!registry.contains("Wspeed"));
        assert!(!registry.contains("Wdir"));
    }

    #[test]
    fn descriptors_can_be_overridden() {
        let mut registry = MetricRegistry::canonical();
        let custom = MetricDescriptor {
            display_name: "Air temperature",
            unit: "°C",
            range: (-20.0, 40.0),
            color_scale: "plasma",
        };
        registry.insert("DBT", custom.clone());
        assert_eq!(registry.get("DBT"), Some(&custom));
    }

    #[test]
    fn category_ranges_span_the_stress_labels() {
        let registry = MetricRegistry::canonical();
        let descriptor = registry.get("utci_noSun_Wind_categories").unwrap();
        assert_eq!(descriptor.range, (-5.0, 4.0));
    }
}
