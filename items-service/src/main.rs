use items_service::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config)?;
    config.validate()?;

    #[cfg(feature = "dynamodb")]
    let repository = DynamoDbItemRepository::connect(&config.storage).await;

    #[cfg(not(feature = "dynamodb"))]
    let repository = {
        tracing::warn!("Built without the dynamodb feature, items are kept in memory");
        InMemoryItemRepository::new()
    };

    let state = AppState::new(config.clone(), repository);
    Server::new(config).serve(router(state)).await
}
