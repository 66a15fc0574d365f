use clima::MetricRegistry;

fn main() {
    let registry = MetricRegistry::canonical();
    let mut ids: Vec<_> = registry.ids().collect();
    ids.sort_unstable();

    println!("{} chartable metrics:", registry.len());
    for id in ids {
        let descriptor = registry.get(id).expect("listed id");
        println!(
            "{id:30} {:40} [{}] range {:?} scale {}",
            descriptor.display_name, descriptor.unit, descriptor.range, descriptor.color_scale
        );
    }
}
