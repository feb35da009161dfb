#[tokio::main]
async fn main() -> anyhow::Result<()> {
    invitelink::bootstrapper::run().await
}
