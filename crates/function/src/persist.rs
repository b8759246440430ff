// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! By-value form of functions that cannot be resolved through a symbol path.
//!
//! Expression templates persist as their expression tree. Opaque callables
//! persist only when they expose a body; such bodies are not relocatable
//! across runtime versions, so the runtime version they were captured under is
//! recorded next to them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tessera_type::{Result, return_error};
use uuid::Uuid;

use crate::{
	callable::Callable,
	error::FunctionError,
	function::{BoundFunction, Implementation},
	signature::Signature,
	template::ExprTemplate,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistedKind {
	Callable,
	Template,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedFunction {
	pub name: String,
	pub kind: PersistedKind,
	pub signatures: Vec<Signature>,
	#[serde(default)]
	pub batch_size: Option<usize>,
	#[serde(default)]
	pub templates: Vec<ExprTemplate>,
}

/// Turns a persisted body back into a callable.
pub trait CallableLoader {
	fn load(&self, body: &[u8]) -> Result<Arc<dyn Callable>>;
}

impl<F> CallableLoader for F
where
	F: Fn(&[u8]) -> Result<Arc<dyn Callable>>,
{
	fn load(&self, body: &[u8]) -> Result<Arc<dyn Callable>> {
		self(body)
	}
}

impl BoundFunction {
	/// Persisted form plus the opaque body, if any.
	pub fn to_persisted(&self) -> Result<(PersistedFunction, Option<Vec<u8>>)> {
		match &self.implementation {
			Implementation::Template(templates) => Ok((
				PersistedFunction {
					name: self.name.clone(),
					kind: PersistedKind::Template,
					signatures: self.signatures.clone(),
					batch_size: None,
					templates: templates.clone(),
				},
				None,
			)),
			Implementation::Callable(callables) => {
				// all overloads share one callable
				let Some(body) = callables.first().and_then(|c| c.body()) else {
					return_error!(FunctionError::NotPersistable {
						function: self.qualified_name().to_string()
					});
				};
				Ok((
					PersistedFunction {
						name: self.name.clone(),
						kind: PersistedKind::Callable,
						signatures: self.signatures.clone(),
						batch_size: self.batch_size,
						templates: vec![],
					},
					Some(body),
				))
			}
		}
	}

	pub fn from_persisted(
		id: Uuid,
		persisted: PersistedFunction,
		body: Option<&[u8]>,
		loader: &dyn CallableLoader,
	) -> Result<BoundFunction> {
		if persisted.signatures.is_empty() {
			return_error!(FunctionError::MalformedRecord {
				reason: format!("function {} has no signatures", id)
			});
		}

		let implementation = match persisted.kind {
			PersistedKind::Template => {
				if persisted.templates.len() != persisted.signatures.len() {
					return_error!(FunctionError::MalformedRecord {
						reason: format!(
							"function {} has {} templates for {} signatures",
							id,
							persisted.templates.len(),
							persisted.signatures.len()
						)
					});
				}
				Implementation::Template(persisted.templates)
			}
			PersistedKind::Callable => {
				let Some(body) = body else {
					return_error!(FunctionError::MalformedRecord {
						reason: format!("function {} has no body", id)
					});
				};
				let callable = loader.load(body)?;
				Implementation::Callable(vec![callable; persisted.signatures.len()])
			}
		};

		Ok(BoundFunction {
			id,
			name: persisted.name,
			path: None,
			signatures: persisted.signatures,
			implementation,
			batch_size: persisted.batch_size,
			is_method: false,
			is_property: false,
			resource_pool: None,
		})
	}
}
