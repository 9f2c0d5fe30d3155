use facet_viewer::{ViewerConfig, run};

fn main() -> anyhow::Result<()> {
    run(ViewerConfig::from_env())
}
