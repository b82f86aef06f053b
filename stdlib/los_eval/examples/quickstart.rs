use los_eval::{evaluate, render_table, MetricsReport};

fn main() {
    let actual = [3.0, 10.0, 20.0, 5.0, 12.0, 16.0];
    let predicted = [4.0, 9.0, 13.0, 8.5, 11.0, 19.0];

    let ev = match evaluate(&actual, &predicted) {
        Ok(ev) => ev,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    print!("{}", render_table(&ev));

    let report = MetricsReport::from_evaluation("quickstart", &ev);
    match report.to_json_pretty() {
        Ok(json) => println!("\n{json}"),
        Err(e) => eprintln!("error: {e}"),
    }
}
