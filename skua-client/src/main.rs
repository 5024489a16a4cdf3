use anyhow::Result;
use skua_client::{ClientConfig, ConsumerOptions, Skua};
use skua_protocol::{OffsetValue, PartitionOffset, TopicOffsets};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .compact()
        .init();

    let config = ClientConfig {
        brokers: vec!["127.0.0.1:9092".to_string()],
        ..ClientConfig::default()
    };
    let client = Skua::new(config);

    let consumer = client.consumer("demo-group", ConsumerOptions::default());
    consumer.connect().await?;

    let resolved = consumer
        .resolve_starting_offsets(vec![TopicOffsets::new(
            "orders",
            vec![PartitionOffset {
                partition: 0,
                offset: OffsetValue::Earliest,
            }],
        )])
        .await?;

    println!("starting offsets: {:?}", resolved);
    println!("committed: {:?}", consumer.committed().await);

    consumer.disconnect().await;
    Ok(())
}
