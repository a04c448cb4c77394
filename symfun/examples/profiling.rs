use symfun::training::TrainingData;
use symfun::TrainingOptions;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).expect("expected a path to a JSON options file");
    let options = TrainingOptions::from_json(&std::fs::read_to_string(path)?)?;

    // enable collection of profiling data
    time_graph::enable_data_collection(true);
    time_graph::clear_collected_data();

    let data = time_graph::spanned!("Full calculation", {
        let inputs = options.inputs()?;
        TrainingData::generate(&options, &inputs)?
    });
    println!("computed features for {} samples", data.len());

    let graph = time_graph::get_full_graph();
    // (this requires the "table" feature for the time_graph crate)
    println!("{}", graph.as_short_table());
    // (this requires the "json" feature for the time_graph crate)
    println!("{}", graph.as_json());

    Ok(())
}
