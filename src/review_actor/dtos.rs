use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreate {
    pub product_id: String,
    pub user_name: String,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
}
