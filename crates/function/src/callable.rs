// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tessera_type::{Result, Value};

/// Executable body of a bound function.
///
/// `call_batch` receives one column per parameter: batched parameters carry
/// one value per row, non-batched parameters carry a single value. The default
/// implementation falls back to row-by-row `call`.
pub trait Callable: Send + Sync {
	fn call(&self, args: &[Value]) -> Result<Value>;

	fn call_batch(&self, args: &[Vec<Value>], rows: usize) -> Result<Vec<Value>> {
		(0..rows)
			.map(|row| {
				let row_args: Vec<Value> = args
					.iter()
					.map(|column| column.get(row).or_else(|| column.first()).cloned().unwrap_or(Value::None))
					.collect();
				self.call(&row_args)
			})
			.collect()
	}

	/// Serialized body for persisting the callable; `None` if the callable
	/// cannot be relocated.
	fn body(&self) -> Option<Vec<u8>> {
		None
	}
}

struct ScalarFn<F>(F);

impl<F> Callable for ScalarFn<F>
where
	F: Fn(&[Value]) -> Result<Value> + Send + Sync,
{
	fn call(&self, args: &[Value]) -> Result<Value> {
		(self.0)(args)
	}
}

struct BatchFn<F>(F);

impl<F> Callable for BatchFn<F>
where
	F: Fn(&[Vec<Value>], usize) -> Result<Vec<Value>> + Send + Sync,
{
	fn call(&self, args: &[Value]) -> Result<Value> {
		let columns: Vec<Vec<Value>> = args.iter().map(|arg| vec![arg.clone()]).collect();
		let mut result = (self.0)(&columns, 1)?;
		Ok(result.pop().unwrap_or(Value::None))
	}

	fn call_batch(&self, args: &[Vec<Value>], rows: usize) -> Result<Vec<Value>> {
		(self.0)(args, rows)
	}
}

struct WithBody {
	inner: Arc<dyn Callable>,
	body: Vec<u8>,
}

impl Callable for WithBody {
	fn call(&self, args: &[Value]) -> Result<Value> {
		self.inner.call(args)
	}

	fn call_batch(&self, args: &[Vec<Value>], rows: usize) -> Result<Vec<Value>> {
		self.inner.call_batch(args, rows)
	}

	fn body(&self) -> Option<Vec<u8>> {
		Some(self.body.clone())
	}
}

pub fn scalar<F>(f: F) -> Arc<dyn Callable>
where
	F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
{
	Arc::new(ScalarFn(f))
}

pub fn batch<F>(f: F) -> Arc<dyn Callable>
where
	F: Fn(&[Vec<Value>], usize) -> Result<Vec<Value>> + Send + Sync + 'static,
{
	Arc::new(BatchFn(f))
}

/// Attaches a serialized body so the callable can be persisted.
pub fn with_body(inner: Arc<dyn Callable>, body: impl Into<Vec<u8>>) -> Arc<dyn Callable> {
	Arc::new(WithBody {
		inner,
		body: body.into(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_batch_falls_back_to_rows() {
		let add = scalar(|args| match (&args[0], &args[1]) {
			(Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
			_ => Ok(Value::None),
		});

		// second parameter is not batched: a single value shared by all rows
		let columns = vec![vec![Value::Int(1), Value::Int(2), Value::Int(3)], vec![Value::Int(10)]];
		let result = add.call_batch(&columns, 3).unwrap();
		assert_eq!(result, vec![Value::Int(11), Value::Int(12), Value::Int(13)]);
	}

	#[test]
	fn test_batch_callable_single_call() {
		let len = batch(|args, rows| {
			Ok(args[0]
				.iter()
				.take(rows)
				.map(|v| match v {
					Value::String(s) => Value::Int(s.len() as i64),
					_ => Value::None,
				})
				.collect())
		});
		assert_eq!(len.call(&[Value::from("abc")]).unwrap(), Value::Int(3));
	}

	#[test]
	fn test_body() {
		let f = scalar(|_| Ok(Value::None));
		assert_eq!(f.body(), None);
		let f = with_body(f, b"opaque".to_vec());
		assert_eq!(f.body(), Some(b"opaque".to_vec()));
	}
}
