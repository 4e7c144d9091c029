use crate::{
    domain::common::{AdvisorConfig, services::Service},
    infrastructure::open_food_facts::OpenFoodFactsClient,
};

pub type FoodLensService = Service<OpenFoodFactsClient, OpenFoodFactsClient>;

pub async fn create_service(config: AdvisorConfig) -> Result<FoodLensService, anyhow::Error> {
    let client = OpenFoodFactsClient::new(config.open_food_facts.clone())?;

    tracing::info!(
        base_url = %config.open_food_facts.base_url,
        policy = %config.analysis.alternatives_policy,
        "food lens service created"
    );

    Ok(Service::new(client.clone(), client, config.analysis))
}
