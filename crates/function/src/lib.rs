// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod bind;
pub mod callable;
pub mod descriptor;
pub mod error;
pub mod expr;
mod function;
pub mod path;
pub mod persist;
pub mod registry;
pub mod resource;
pub mod signature;
pub mod template;

pub use bind::BindOptions;
pub use callable::Callable;
pub use descriptor::{FunctionDescriptor, ParamSpec, ReturnSpec, TypeSpec};
pub use error::FunctionError;
pub use expr::{Expr, FunctionRef};
pub use function::{BoundFunction, Implementation};
pub use persist::{CallableLoader, PersistedFunction, PersistedKind};
pub use registry::{FunctionRegistry, bind, bind_template};
pub use resource::{CallContext, ResourcePool};
pub use signature::{Parameter, Signature, TypeSubstitution};
pub use template::ExprTemplate;
