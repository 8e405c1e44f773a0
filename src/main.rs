fn main() {
    simplelocalize::app::cli::run();
}
