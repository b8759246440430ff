// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{expr::Expr, signature::Signature};

/// Expression body of a template function; parameters appear as
/// [`Expr::Variable`] placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprTemplate {
	pub signature: Signature,
	pub expr: Expr,
}

impl ExprTemplate {
	/// Substitutes call-site arguments for the parameter placeholders.
	/// Parameters without an argument fall back to their default literal.
	pub fn instantiate(&self, args: Vec<Expr>) -> Expr {
		let mut args = args.into_iter();
		let mut bindings = HashMap::with_capacity(self.signature.parameters.len());

		for param in &self.signature.parameters {
			let bound = match args.next() {
				Some(arg) => arg,
				None => match &param.default {
					Some(default) => Expr::literal(default.clone()),
					None => continue,
				},
			};
			bindings.insert(param.name.as_str(), bound);
		}

		self.expr.substitute_variables(&bindings)
	}
}
