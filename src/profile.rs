//! Payloads returned by the API gateway.

// std
use std::io;
// crates.io
use serde_json::{
	Value,
	ser::{Formatter, PrettyFormatter},
};
// self
use crate::_prelude::*;

/// User profile returned by the profile endpoint.
///
/// The payload is kept opaque and displayed verbatim; [`user_info`](Self::user_info) offers a
/// typed reading of the fields the gateway is known to return.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(Value);
impl Profile {
	/// Wraps a raw JSON payload.
	pub fn new(value: Value) -> Self {
		Self(value)
	}

	/// Raw JSON payload.
	pub fn as_value(&self) -> &Value {
		&self.0
	}

	/// Consumes the profile, returning the raw payload.
	pub fn into_value(self) -> Value {
		self.0
	}

	/// Payload rendered with two-space indentation and keys in response order, as shown in the
	/// user-data region.
	///
	/// Numbers follow the JavaScript `Number#toString` rules, so `1.0` renders as `1` and `1e21`
	/// as `1e+21`.
	pub fn pretty(&self) -> String {
		let mut buf = Vec::new();
		let mut ser =
			serde_json::Serializer::with_formatter(&mut buf, ScriptFormatter(PrettyFormatter::new()));

		match self.0.serialize(&mut ser) {
			Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| format!("{:#}", self.0)),
			Err(_) => format!("{:#}", self.0),
		}
	}

	/// Typed view of the gateway's user payload; `None` when the payload is not an object.
	pub fn user_info(&self) -> Option<UserInfo> {
		if !self.0.is_object() {
			return None;
		}

		serde_json::from_value(self.0.clone()).ok()
	}
}

/// Pretty printer that writes floating-point numbers the way JavaScript stringifies them.
struct ScriptFormatter<'a>(PrettyFormatter<'a>);
impl Formatter for ScriptFormatter<'_> {
	fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		writer.write_all(script_number(value).as_bytes())
	}

	fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		self.0.begin_array(writer)
	}

	fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		self.0.end_array(writer)
	}

	fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		self.0.begin_array_value(writer, first)
	}

	fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		self.0.end_array_value(writer)
	}

	fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		self.0.begin_object(writer)
	}

	fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		self.0.end_object(writer)
	}

	fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		self.0.begin_object_key(writer, first)
	}

	fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		self.0.begin_object_value(writer)
	}

	fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		self.0.end_object_value(writer)
	}
}

// Shortest round-trip digits, laid out per ECMAScript Number::toString.
fn script_number(value: f64) -> String {
	if !value.is_finite() {
		return "null".into();
	}
	if value == 0.0 {
		return "0".into();
	}

	let sci = format!("{:e}", value.abs());
	let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
	let digits = mantissa.replace('.', "");
	let k = digits.len() as i32;
	let n = exponent.parse::<i32>().unwrap_or(0) + 1;
	let mut out = String::new();

	if value.is_sign_negative() {
		out.push('-');
	}

	if (k..=21).contains(&n) {
		out.push_str(&digits);
		out.push_str(&"0".repeat((n - k) as usize));
	} else if (1..=21).contains(&n) {
		let (int, frac) = digits.split_at(n as usize);

		out.push_str(int);
		out.push('.');
		out.push_str(frac);
	} else if (-5..=0).contains(&n) {
		out.push_str("0.");
		out.push_str(&"0".repeat((-n) as usize));
		out.push_str(&digits);
	} else {
		let (lead, rest) = digits.split_at(1);

		out.push_str(lead);

		if !rest.is_empty() {
			out.push('.');
			out.push_str(rest);
		}

		out.push('e');
		out.push(if n > 0 { '+' } else { '-' });
		out.push_str(&(n - 1).abs().to_string());
	}

	out
}

/// Identity fields the gateway extracts from the verified token.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
	/// Token subject.
	pub user_id: Option<String>,
	/// User email address.
	pub email: Option<String>,
	/// Display name.
	pub name: Option<String>,
	/// Scopes granted to the token.
	pub scopes: Vec<String>,
	/// Token issuer.
	pub token_issuer: Option<String>,
	/// Full authorizer context forwarded by the gateway.
	pub raw_context: Option<Value>,
}

/// Response of the public health endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
	/// Service status label (`ok` when healthy).
	pub status: String,
	/// Service name.
	#[serde(default)]
	pub service: Option<String>,
	/// Deployment environment.
	#[serde(default)]
	pub environment: Option<String>,
}
impl HealthReport {
	/// Returns true when the service reports `ok`.
	pub fn is_ok(&self) -> bool {
		self.status.eq_ignore_ascii_case("ok")
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn pretty_keeps_response_key_order() {
		let profile: Profile = serde_json::from_str(r#"{"user_id":"u-1","email":"a@b.c","scopes":[]}"#)
			.expect("Profile fixture should parse.");

		assert_eq!(
			profile.pretty(),
			"{\n  \"user_id\": \"u-1\",\n  \"email\": \"a@b.c\",\n  \"scopes\": []\n}"
		);
	}

	#[test]
	fn pretty_renders_numbers_like_javascript() {
		let profile: Profile = serde_json::from_str(r#"{"exp":1.0,"big":1e3}"#)
			.expect("Numeric profile fixture should parse.");

		assert_eq!(profile.pretty(), "{\n  \"exp\": 1,\n  \"big\": 1000\n}");
	}

	#[test]
	fn float_layout_switches_to_exponent_outside_display_range() {
		assert_eq!(script_number(1e21), "1e+21");
		assert_eq!(script_number(1e20), "100000000000000000000");
		assert_eq!(script_number(1.5e-7), "1.5e-7");
		assert_eq!(script_number(0.000001), "0.000001");
		assert_eq!(script_number(0.1), "0.1");
		assert_eq!(script_number(-123.456), "-123.456");
		assert_eq!(script_number(-0.0), "0");
		assert_eq!(script_number(2.5e300), "2.5e+300");
	}

	#[test]
	fn user_info_reads_known_fields_leniently() {
		let profile = Profile::new(json!({
			"user_id": "ajeabc",
			"email": "user@example.com",
			"scopes": ["openid", "email"],
			"extra": true
		}));
		let info = profile.user_info().expect("Object payload should yield user info.");

		assert_eq!(info.user_id.as_deref(), Some("ajeabc"));
		assert_eq!(info.email.as_deref(), Some("user@example.com"));
		assert_eq!(info.scopes, vec!["openid".to_string(), "email".to_string()]);
		assert!(info.name.is_none());
	}

	#[test]
	fn non_object_payload_has_no_user_info() {
		assert!(Profile::new(json!(["not", "a", "user"])).user_info().is_none());
	}

	#[test]
	fn health_report_recognizes_ok() {
		let report: HealthReport =
			serde_json::from_str(r#"{"status":"ok","service":"demo-auth-api"}"#)
				.expect("Health fixture should parse.");

		assert!(report.is_ok());
		assert!(report.environment.is_none());
	}
}
