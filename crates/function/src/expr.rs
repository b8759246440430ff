// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, fmt::{Display, Formatter}};

use serde::{Deserialize, Serialize};
use tessera_type::{ColumnType, Value};
use uuid::Uuid;

/// How a call expression names its function: by symbol path for registered
/// functions, by id for functions persisted in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionRef {
	Path(String),
	Id(Uuid),
}

impl Display for FunctionRef {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			FunctionRef::Path(path) => f.write_str(path),
			FunctionRef::Id(id) => write!(f, "<{}>", id),
		}
	}
}

/// Typed expression tree. Used as the body of expression templates and as the
/// value expression of computed columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
	Column {
		name: String,
		col_type: ColumnType,
	},
	/// Placeholder for a template parameter.
	Variable {
		name: String,
		col_type: ColumnType,
	},
	Literal {
		value: Value,
	},
	Call {
		function: FunctionRef,
		#[serde(default)]
		overload: usize,
		args: Vec<Expr>,
		return_type: ColumnType,
	},
}

impl Expr {
	pub fn column(name: impl Into<String>, col_type: ColumnType) -> Expr {
		Expr::Column {
			name: name.into(),
			col_type,
		}
	}

	pub fn variable(name: impl Into<String>, col_type: ColumnType) -> Expr {
		Expr::Variable {
			name: name.into(),
			col_type,
		}
	}

	pub fn literal(value: impl Into<Value>) -> Expr {
		Expr::Literal {
			value: value.into(),
		}
	}

	pub fn col_type(&self) -> ColumnType {
		match self {
			Expr::Column {
				col_type,
				..
			}
			| Expr::Variable {
				col_type,
				..
			} => col_type.clone(),
			Expr::Literal {
				value,
			} => value.column_type(),
			Expr::Call {
				return_type,
				..
			} => return_type.clone(),
		}
	}

	/// Names of all columns referenced anywhere in the tree, in order of
	/// first appearance.
	pub fn column_refs(&self) -> Vec<&str> {
		let mut result = vec![];
		self.collect_column_refs(&mut result);
		result
	}

	fn collect_column_refs<'a>(&'a self, out: &mut Vec<&'a str>) {
		match self {
			Expr::Column {
				name,
				..
			} => {
				if !out.contains(&name.as_str()) {
					out.push(name);
				}
			}
			Expr::Call {
				args,
				..
			} => args.iter().for_each(|arg| arg.collect_column_refs(out)),
			Expr::Variable {
				..
			}
			| Expr::Literal {
				..
			} => {}
		}
	}

	/// Replaces variables with the given expressions; unknown variables stay.
	pub fn substitute_variables(&self, bindings: &HashMap<&str, Expr>) -> Expr {
		match self {
			Expr::Variable {
				name,
				..
			} => bindings.get(name.as_str()).cloned().unwrap_or_else(|| self.clone()),
			Expr::Call {
				function,
				overload,
				args,
				return_type,
			} => Expr::Call {
				function: function.clone(),
				overload: *overload,
				args: args.iter().map(|arg| arg.substitute_variables(bindings)).collect(),
				return_type: return_type.clone(),
			},
			other => other.clone(),
		}
	}
}
