//! Book representations.

use chrono::NaiveDateTime;
use erudio_hateoas::Link;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Book, version 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename = "BookVO", rename_all = "camelCase")]
pub struct BookVO {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 180))]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<NaiveDateTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 250))]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}
