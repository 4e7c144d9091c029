use clap::{Args as ClapArgs, Parser};
use foodlens_core::domain::{
    analysis::value_objects::AlternativesPolicy,
    common::{AdvisorConfig, AnalysisConfig, DEFAULT_OPEN_FOOD_FACTS_URL, OpenFoodFactsConfig},
};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "foodlens-api",
    version,
    about = "Food product processing classification and health scoring API"
)]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub open_food_facts: OpenFoodFactsArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix prepended to every route, e.g. `/api`
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct OpenFoodFactsArgs {
    #[arg(
        long = "open-food-facts-url",
        env = "OPEN_FOOD_FACTS_URL",
        default_value = DEFAULT_OPEN_FOOD_FACTS_URL
    )]
    pub base_url: String,

    /// Overrides the default `foodlens/<version>` user agent
    #[arg(long = "open-food-facts-user-agent", env = "OPEN_FOOD_FACTS_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Timeout of the first attempt; later attempts scale it by the attempt number
    #[arg(
        long = "open-food-facts-timeout-secs",
        env = "OPEN_FOOD_FACTS_TIMEOUT_SECS",
        default_value_t = 8
    )]
    pub timeout_secs: u64,

    #[arg(
        long = "open-food-facts-max-retries",
        env = "OPEN_FOOD_FACTS_MAX_RETRIES",
        default_value_t = 3
    )]
    pub max_retries: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct AnalysisArgs {
    /// One of `never`, `when-processed`, `always`
    #[arg(
        long = "alternatives-policy",
        env = "ALTERNATIVES_POLICY",
        default_value = "when-processed"
    )]
    pub alternatives_policy: AlternativesPolicy,

    #[arg(long = "max-alternatives", env = "MAX_ALTERNATIVES", default_value_t = 3)]
    pub max_alternatives: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for AdvisorConfig {
    fn from(args: Args) -> Self {
        let mut open_food_facts = OpenFoodFactsConfig {
            base_url: args.open_food_facts.base_url,
            timeout_secs: args.open_food_facts.timeout_secs,
            max_retries: args.open_food_facts.max_retries,
            ..Default::default()
        };
        if let Some(user_agent) = args.open_food_facts.user_agent {
            open_food_facts.user_agent = user_agent;
        }

        AdvisorConfig {
            open_food_facts,
            analysis: AnalysisConfig {
                alternatives_policy: args.analysis.alternatives_policy,
                max_alternatives: args.analysis.max_alternatives,
            },
        }
    }
}
