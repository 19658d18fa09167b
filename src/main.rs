fn main() -> anyhow::Result<()> {
    env_logger::init();
    quick_capture::cli::run()
}
