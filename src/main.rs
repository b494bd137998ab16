use anyhow::Result;

fn main() -> Result<()> {
    callsite_augment::run_cli()
}
