#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kafka_notify::run().await
}
