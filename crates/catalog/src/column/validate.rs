// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tessera_function::{Expr, FunctionError, FunctionRef, Signature, path::is_identifier};
use tessera_type::{ColumnType, Result, error::TypeError, return_error};

use crate::{
	Catalog,
	column::{ColumnToCreate, VisibleColumn},
	error::CatalogError,
	id::FunctionId,
	key::Key,
	md::{ComputedValue, FunctionMd},
};

impl Catalog {
	pub(crate) fn validate_column(&self, column: &ColumnToCreate, visible: &[VisibleColumn]) -> Result<()> {
		if !is_identifier(&column.name) {
			return_error!(CatalogError::InvalidName {
				kind: "column",
				name: column.name.clone(),
			});
		}
		if column.col_type.is_invalid() {
			return_error!(TypeError::InvalidType);
		}
		if column.is_indexed && !is_indexable(&column.col_type) {
			return_error!(CatalogError::NotIndexable {
				column: column.name.clone(),
				col_type: column.col_type.clone(),
			});
		}

		let Some(computed) = &column.computed else {
			if column.stored.is_some() {
				return_error!(CatalogError::InvalidStoragePolicy {
					column: column.name.clone()
				});
			}
			return Ok(());
		};

		if column.is_pk {
			return_error!(CatalogError::ComputedPrimaryKey {
				column: column.name.clone()
			});
		}
		if let ComputedValue::Expr {
			expr,
		} = computed
		{
			self.check_expr(&column.name, expr, visible)?;
			expr.col_type().require_conversion_to(&column.col_type)?;
		}
		Ok(())
	}

	/// Checks the column references and calls of the value expression of
	/// `column`.
	fn check_expr(&self, column: &str, expr: &Expr, visible: &[VisibleColumn]) -> Result<()> {
		match expr {
			Expr::Column {
				name,
				col_type,
			} => {
				let Some((_, actual)) = visible.iter().find(|(visible, _)| visible == name) else {
					return_error!(CatalogError::UnknownColumnReference {
						column: column.to_string(),
						reference: name.clone(),
					});
				};
				if actual != col_type {
					actual.require_conversion_to(col_type)?;
				}
				Ok(())
			}
			// placeholders only exist inside templates
			Expr::Variable {
				name,
				..
			} => return_error!(CatalogError::UnknownColumnReference {
				column: column.to_string(),
				reference: name.clone(),
			}),
			Expr::Literal {
				..
			} => Ok(()),
			Expr::Call {
				function,
				overload,
				args,
				return_type,
			} => {
				for arg in args {
					self.check_expr(column, arg, visible)?;
				}

				let (name, signatures) = self.call_signatures(function)?;
				let Some(signature) = signatures.get(*overload) else {
					return_error!(FunctionError::UnknownOverload {
						function: name,
						index: *overload,
					});
				};

				let arg_types: Vec<ColumnType> = args.iter().map(Expr::col_type).collect();
				if signature.accepts(&arg_types).is_none() {
					return_error!(FunctionError::NoMatchingOverload {
						function: name,
						args: arg_types,
					});
				}
				signature.return_type.require_conversion_to(return_type)?;
				Ok(())
			}
		}
	}

	fn call_signatures(&self, function: &FunctionRef) -> Result<(String, Vec<Signature>)> {
		match function {
			FunctionRef::Path(path) => {
				let function = self.registry.resolve(path)?;
				Ok((function.qualified_name().to_string(), function.signatures.clone()))
			}
			FunctionRef::Id(id) => {
				let id = FunctionId(*id);
				match self.read_md::<FunctionMd>(&Key::Function(id))? {
					Some((_, md)) => Ok((md.name.unwrap_or_else(|| id.to_string()), md.md.signatures)),
					None => return_error!(CatalogError::FunctionNotFound {
						function: id
					}),
				}
			}
		}
	}
}

fn is_indexable(col_type: &ColumnType) -> bool {
	col_type.is_image() || *col_type == ColumnType::String
}
