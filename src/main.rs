fn main() {
    if let Err(err) = annoplot::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
