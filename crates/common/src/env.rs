use dotenvy_macro::dotenv;

pub const OWNER_SECRET: &str = dotenv!("OWNER_SECRET");

pub const TRONGRID_API_KEY: &str = dotenv!("TRONGRID_API_KEY");
pub const TRC20_CONTRACT_ADDRESS: &str = dotenv!("TRC20_CONTRACT_ADDRESS");
pub const TRC20_RECEIVER_ADDRESS: &str = dotenv!("TRC20_RECEIVER_ADDRESS");

pub const GOOGLE_TRANSLATE_API_KEY: &str = dotenv!("GOOGLE_TRANSLATE_API_KEY");
