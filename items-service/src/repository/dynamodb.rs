//! DynamoDB-backed item store
//!
//! Items live in a single table keyed by the string attribute `id`. Writes
//! are conditional (`attribute_not_exists(id)` on create,
//! `attribute_exists(id)` on update and delete) so concurrent requests are
//! serialized by DynamoDB itself. The SDK performs its own retries; this
//! adapter does not.

use std::collections::HashMap;
use std::time::Duration;

use aws_config::{timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_dynamodb::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    types::{AttributeValue, ReturnValue},
    Client,
};
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use super::context::RequestContext;
use super::error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
use super::pagination::{ContinuationToken, ListOptions, ListPage};
use super::traits::{require_id, ItemRepository, RepositoryResult};
use crate::config::StorageConfig;
use crate::models::{Item, ItemPatch, ItemStatus};

const KEY: &str = "id";

/// Error code for a failed `condition_expression`
const CONDITIONAL_CHECK_FAILED: &str = "ConditionalCheckFailedException";

/// Error codes DynamoDB returns when a request is throttled
const THROTTLING_CODES: &[&str] = &[
    "ProvisionedThroughputExceededException",
    "RequestLimitExceeded",
    "ThrottlingException",
];

/// Substrings that mark a rejected request as malformed
const VALIDATION_KEYWORDS: &[&str] = &[
    "ValidationException",
    "validation",
    "invalid",
    "malformed",
    "bad request",
];

/// Item store backed by a DynamoDB table
#[derive(Debug, Clone)]
pub struct DynamoDbItemRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbItemRepository {
    /// Wrap an existing client
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from storage configuration
    ///
    /// Credentials come from the standard AWS provider chain. The client is
    /// meant to be built once at startup and shared.
    pub async fn connect(config: &StorageConfig) -> Self {
        let timeouts = TimeoutConfig::builder()
            .operation_timeout(Duration::from_millis(config.operation_timeout_ms))
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .timeout_config(timeouts);
        if let Some(endpoint) = &config.endpoint_url {
            tracing::info!(endpoint = %endpoint, "Using custom DynamoDB endpoint");
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        tracing::info!(
            table = %config.table_name,
            region = %config.region,
            "DynamoDB client initialized"
        );
        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    fn key(id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }
}

impl ItemRepository for DynamoDbItemRepository {
    async fn create(&self, ctx: &RequestContext, mut item: Item) -> RepositoryResult<Item> {
        ctx.run(RepositoryOperation::Create, async move {
            if item.id.is_empty() {
                item.id = Uuid::new_v4().to_string();
            }
            item.validate().map_err(|e| {
                RepositoryError::invalid_input(RepositoryOperation::Create, e.message())
                    .with_entity(item.id.clone())
            })?;

            self.client
                .put_item()
                .table_name(&self.table_name)
                .set_item(Some(to_attributes(&item)))
                .condition_expression("attribute_not_exists(id)")
                .send()
                .await
                .map_err(|err| classify_write(RepositoryOperation::Create, &item.id, &err))?;

            tracing::debug!(item_id = %item.id, request_id = ctx.request_id(), "PutItem succeeded");
            Ok(item)
        })
        .await
    }

    async fn get(&self, ctx: &RequestContext, id: &str) -> RepositoryResult<Item> {
        ctx.run(RepositoryOperation::Get, async {
            require_id(RepositoryOperation::Get, id)?;

            let output = self
                .client
                .get_item()
                .table_name(&self.table_name)
                .key(KEY, Self::key(id))
                .send()
                .await
                .map_err(|err| classify(RepositoryOperation::Get, &err).with_entity(id))?;

            match output.item() {
                Some(attributes) => from_attributes(RepositoryOperation::Get, attributes),
                None => Err(RepositoryError::not_found(RepositoryOperation::Get, id)),
            }
        })
        .await
    }

    async fn list(&self, ctx: &RequestContext, options: &ListOptions) -> RepositoryResult<ListPage> {
        ctx.run(RepositoryOperation::List, async {
            let start_key = match &options.continuation {
                Some(token) => Some(HashMap::from([(
                    KEY.to_string(),
                    Self::key(&token.decode_key()?),
                )])),
                None => None,
            };

            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .limit(options.effective_limit() as i32)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|err| classify(RepositoryOperation::List, &err))?;

            let items = output
                .items()
                .iter()
                .map(|attributes| from_attributes(RepositoryOperation::List, attributes))
                .collect::<RepositoryResult<Vec<_>>>()?;

            let next_token = output
                .last_evaluated_key()
                .and_then(|key| key.get(KEY))
                .and_then(|value| value.as_s().ok())
                .map(|id| ContinuationToken::after_key(id));

            Ok(ListPage { items, next_token })
        })
        .await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        patch: &ItemPatch,
    ) -> RepositoryResult<Item> {
        ctx.run(RepositoryOperation::Update, async {
            require_id(RepositoryOperation::Update, id)?;

            let update = UpdateExpression::from_patch(patch, Utc::now());
            let output = self
                .client
                .update_item()
                .table_name(&self.table_name)
                .key(KEY, Self::key(id))
                .update_expression(update.expression)
                .set_expression_attribute_names(Some(update.names))
                .set_expression_attribute_values(Some(update.values))
                .condition_expression("attribute_exists(id)")
                .return_values(ReturnValue::AllNew)
                .send()
                .await
                .map_err(|err| classify_write(RepositoryOperation::Update, id, &err))?;

            let attributes = output.attributes().ok_or_else(|| {
                RepositoryError::operation_failed(
                    RepositoryOperation::Update,
                    "update returned no attributes",
                )
                .with_entity(id)
            })?;
            from_attributes(RepositoryOperation::Update, attributes)
        })
        .await
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> RepositoryResult<()> {
        ctx.run(RepositoryOperation::Delete, async {
            require_id(RepositoryOperation::Delete, id)?;

            self.client
                .delete_item()
                .table_name(&self.table_name)
                .key(KEY, Self::key(id))
                .condition_expression("attribute_exists(id)")
                .send()
                .await
                .map_err(|err| classify_write(RepositoryOperation::Delete, id, &err))?;
            Ok(())
        })
        .await
    }

    async fn health_check(&self, ctx: &RequestContext) -> RepositoryResult<()> {
        ctx.run(RepositoryOperation::HealthCheck, async {
            self.client
                .describe_table()
                .table_name(&self.table_name)
                .send()
                .await
                .map_err(|err| classify(RepositoryOperation::HealthCheck, &err))?;
            Ok(())
        })
        .await
    }
}

/// Translate an SDK failure into the repository taxonomy
///
/// Conditional-check failures are handled by [`classify_write`], since their
/// meaning depends on the operation.
fn classify<E, R>(operation: RepositoryOperation, err: &SdkError<E, R>) -> RepositoryError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let Some(service) = err.as_service_error() else {
        let detail = DisplayErrorContext(err).to_string();
        return match err {
            SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
                RepositoryError::connection_failed(operation, detail)
            }
            _ => RepositoryError::operation_failed(operation, detail),
        };
    };

    let code = service.code().unwrap_or_default();
    let message = service.message().unwrap_or_default();
    classify_service_error(operation, code, message)
}

/// Translate a failed conditional write, tagging the error with the item id
fn classify_write<E, R>(operation: RepositoryOperation, id: &str, err: &SdkError<E, R>) -> RepositoryError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err.as_service_error() {
        Some(service) => classify_write_error(
            operation,
            id,
            service.code().unwrap_or_default(),
            service.message().unwrap_or_default(),
        ),
        None => classify(operation, err).with_entity(id),
    }
}

// Create is guarded by attribute_not_exists, update and delete by
// attribute_exists.
fn classify_write_error(
    operation: RepositoryOperation,
    id: &str,
    code: &str,
    message: &str,
) -> RepositoryError {
    match (code, operation) {
        (CONDITIONAL_CHECK_FAILED, RepositoryOperation::Create) => {
            RepositoryError::already_exists(id)
        }
        (CONDITIONAL_CHECK_FAILED, _) => RepositoryError::not_found(operation, id),
        _ => classify_service_error(operation, code, message).with_entity(id),
    }
}

fn classify_service_error(
    operation: RepositoryOperation,
    code: &str,
    message: &str,
) -> RepositoryError {
    match code {
        "ResourceNotFoundException" => RepositoryError::new(
            operation,
            RepositoryErrorKind::NotFound,
            format!("resource not found: {message}"),
        ),
        c if THROTTLING_CODES.contains(&c) => RepositoryError::throughput_exceeded(operation),
        "ResourceInUseException" => RepositoryError::operation_failed(operation, "resource in use"),
        "InternalServerError" => {
            RepositoryError::operation_failed(operation, "internal server error")
        }
        _ => {
            let detail = format!("{code}: {message}");
            if VALIDATION_KEYWORDS
                .iter()
                .any(|keyword| detail.contains(keyword))
            {
                RepositoryError::invalid_input(operation, detail)
            } else {
                RepositoryError::operation_failed(operation, detail)
            }
        }
    }
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn to_attributes(item: &Item) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (KEY.to_string(), AttributeValue::S(item.id.clone())),
        ("name".to_string(), AttributeValue::S(item.name.clone())),
        (
            "description".to_string(),
            AttributeValue::S(item.description.clone()),
        ),
        (
            "status".to_string(),
            AttributeValue::S(item.status.to_string()),
        ),
        (
            "created_at".to_string(),
            AttributeValue::S(format_timestamp(&item.created_at)),
        ),
        (
            "updated_at".to_string(),
            AttributeValue::S(format_timestamp(&item.updated_at)),
        ),
    ])
}

fn from_attributes(
    operation: RepositoryOperation,
    attributes: &HashMap<String, AttributeValue>,
) -> RepositoryResult<Item> {
    let corrupt = |field: &str| {
        RepositoryError::operation_failed(operation, format!("stored item has malformed {field}"))
    };
    let string = |field: &str| -> RepositoryResult<String> {
        attributes
            .get(field)
            .and_then(|value| value.as_s().ok())
            .cloned()
            .ok_or_else(|| corrupt(field))
    };
    let timestamp = |field: &str| -> RepositoryResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&string(field)?)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|_| corrupt(field))
    };

    let id = string(KEY)?;
    let status = string("status")?
        .parse::<ItemStatus>()
        .map_err(|_| corrupt("status").with_entity(id.clone()))?;

    Ok(Item {
        name: string("name")?,
        description: string("description").unwrap_or_default(),
        status,
        created_at: timestamp("created_at")?,
        updated_at: timestamp("updated_at")?,
        id,
    })
}

/// `SET` expression for a patch, with placeholder maps
#[derive(Debug)]
struct UpdateExpression {
    expression: String,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl UpdateExpression {
    fn from_patch(patch: &ItemPatch, now: DateTime<Utc>) -> Self {
        let mut update = Self {
            expression: String::new(),
            names: HashMap::new(),
            values: HashMap::new(),
        };
        update.set("updated_at", AttributeValue::S(format_timestamp(&now)));
        if let Some(name) = &patch.name {
            update.set("name", AttributeValue::S(name.clone()));
        }
        if let Some(description) = &patch.description {
            update.set("description", AttributeValue::S(description.clone()));
        }
        if let Some(status) = patch.status {
            update.set("status", AttributeValue::S(status.to_string()));
        }
        update
    }

    fn set(&mut self, attribute: &str, value: AttributeValue) {
        let clause = format!("#{attribute} = :{attribute}");
        if self.expression.is_empty() {
            self.expression = format!("SET {clause}");
        } else {
            self.expression.push_str(", ");
            self.expression.push_str(&clause);
        }
        self.names
            .insert(format!("#{attribute}"), attribute.to_string());
        self.values.insert(format!(":{attribute}"), value);
    }
}
