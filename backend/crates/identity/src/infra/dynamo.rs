//! DynamoDB attribute table
//!
//! The SDK client is built once from `StoreConfig` and reused for every call.

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::ReturnValue;

use crate::application::config::StoreConfig;
use crate::error::{IdentityError, IdentityResult};
use crate::infra::codec::Item;
use crate::infra::table::{AttributeTable, ScanPage};

const THROTTLING_CODES: &[&str] = &[
    "ProvisionedThroughputExceededException",
    "ThrottlingException",
    "RequestLimitExceeded",
];

const UNAVAILABLE_CODES: &[&str] = &["ServiceUnavailable", "InternalServerError"];

/// DynamoDB-backed table
#[derive(Clone)]
pub struct DynamoTable {
    client: Client,
    table_name: String,
}

impl DynamoTable {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build the SDK client for the configured region and endpoint
    pub async fn connect(config: &StoreConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        tracing::info!(
            region = %config.region,
            endpoint = config.endpoint.as_deref().unwrap_or("default"),
            table = %config.table_name,
            "DynamoDB client configured"
        );

        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

/// Classify an SDK failure. Nothing is swallowed: construction and dispatch
/// failures (credentials, DNS, refused connections) surface as
/// `StoreConnection`.
fn map_sdk_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> IdentityError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let detail = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::ConstructionFailure(_) | SdkError::DispatchFailure(_) => {
            IdentityError::StoreConnection(detail)
        }
        SdkError::TimeoutError(_) => IdentityError::StoreTimeout(operation),
        _ => match err.code() {
            Some(code) if THROTTLING_CODES.contains(&code) => IdentityError::StoreThrottled(detail),
            Some(code) if UNAVAILABLE_CODES.contains(&code) => {
                IdentityError::StoreConnection(detail)
            }
            _ => IdentityError::StoreOperation {
                operation,
                message: detail,
            },
        },
    }
}

impl AttributeTable for DynamoTable {
    async fn put_item(&self, item: Item) -> IdentityResult<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_sdk_error("put_item", e))?;
        Ok(())
    }

    async fn get_item(&self, key: Item) -> IdentityResult<Option<Item>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| map_sdk_error("get_item", e))?;

        Ok(output.item().cloned())
    }

    async fn update_item(&self, key: Item, changes: Item) -> IdentityResult<Item> {
        if changes.is_empty() {
            return Err(IdentityError::Internal(
                "update_item called without attributes to set".to_string(),
            ));
        }

        // SET #a0 = :a0, #a1 = :a1, ...
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .return_values(ReturnValue::AllNew);

        let mut clauses = Vec::with_capacity(changes.len());
        for (index, (name, value)) in changes.into_iter().enumerate() {
            let name_placeholder = format!("#a{}", index);
            let value_placeholder = format!(":a{}", index);
            clauses.push(format!("{} = {}", name_placeholder, value_placeholder));
            request = request
                .expression_attribute_names(name_placeholder, name)
                .expression_attribute_values(value_placeholder, value);
        }

        let output = request
            .update_expression(format!("SET {}", clauses.join(", ")))
            .send()
            .await
            .map_err(|e| map_sdk_error("update_item", e))?;

        Ok(output.attributes().cloned().unwrap_or_default())
    }

    async fn delete_item(&self, key: Item) -> IdentityResult<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| map_sdk_error("delete_item", e))?;
        Ok(())
    }

    async fn scan_page(&self, exclusive_start_key: Option<Item>) -> IdentityResult<ScanPage> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_exclusive_start_key(exclusive_start_key)
            .send()
            .await
            .map_err(|e| map_sdk_error("scan", e))?;

        Ok(ScanPage {
            items: output.items().to_vec(),
            last_evaluated_key: output.last_evaluated_key().cloned(),
        })
    }
}
