//! Review workflow contracts.

use serde::{Deserialize, Serialize};

use crate::{Empty, IdParams, Request, Response};

/// Fields every stored entity carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: u64,
    /// RFC 3339 timestamp.
    pub created_at: String,
    /// RFC 3339 timestamp.
    pub updated_at: String,
}

/// A role's permission on a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagePermission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub role: u64,
}

/// One step of a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    #[serde(flatten)]
    pub entity: Option<Entity>,
    pub name: String,
    /// Hex color, e.g. `#4945FF`.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<StagePermission>>,
}

/// An ordered list of stages applied to some content types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(flatten)]
    pub entity: Option<Entity>,
    pub name: String,
    #[serde(default)]
    pub content_types: Vec<String>,
    #[serde(default)]
    pub stages: Vec<Stage>,
}

/// Partial workflow for updates; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<Stage>>,
}

/// `meta` of the list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowsMeta {
    pub workflow_count: u64,
}

/// `GET /review-workflows/workflows`
pub mod get_all {
    use super::*;

    pub type Request = super::Request;
    pub type Response = super::Response<Vec<Workflow>, WorkflowsMeta>;
}

/// `GET /review-workflows/workflows/:id`
pub mod get {
    use super::*;

    pub type Request = super::Request;
    pub type Params = IdParams<u64>;
    pub type Response = super::Response<Workflow>;
}

/// `PUT /review-workflows/workflows/:id`
pub mod update {
    use super::*;

    pub type Request = super::Request<WorkflowUpdate>;
    pub type Params = IdParams<u64>;
    pub type Response = super::Response<Workflow>;
}

/// `POST /review-workflows/workflows`
pub mod create {
    use super::*;

    pub type Request = super::Request<Workflow>;
    pub type Response = super::Response<Workflow, Empty>;
}

/// `DELETE /review-workflows/workflows/:id`
pub mod delete {
    use super::*;

    pub type Request = super::Request;
    pub type Params = IdParams<u64>;
    pub type Response = super::Response<Workflow>;
}
