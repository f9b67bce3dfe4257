fn main() {
    if let Err(err) = ochart::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
