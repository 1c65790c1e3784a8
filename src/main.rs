fn main() {
    if let Err(err) = compass_rs_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
