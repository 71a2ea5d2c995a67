fn main() {
    if let Err(err) = report_plan::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
