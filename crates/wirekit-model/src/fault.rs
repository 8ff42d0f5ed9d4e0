//! Protocol-level fault object

/// A structured error reply.
///
/// # Examples
///
/// ```
/// use wirekit_model::Fault;
///
/// let fault = Fault::server("boom");
/// assert_eq!(fault.faultcode, "Server");
/// assert_eq!(fault.to_string(), "Server: boom");
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{faultcode}: {faultstring}")]
pub struct Fault {
	pub faultcode: String,
	pub faultstring: String,
	pub faultactor: Option<String>,
	pub detail: Option<serde_json::Value>,
}

impl Fault {
	pub fn new(faultcode: impl Into<String>, faultstring: impl Into<String>) -> Self {
		Self {
			faultcode: faultcode.into(),
			faultstring: faultstring.into(),
			faultactor: None,
			detail: None,
		}
	}

	/// A fault blamed on the caller.
	pub fn client(faultstring: impl Into<String>) -> Self {
		Self::new("Client", faultstring)
	}

	/// A fault blamed on the service.
	pub fn server(faultstring: impl Into<String>) -> Self {
		Self::new("Server", faultstring)
	}

	pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
		self.faultactor = Some(actor.into());
		self
	}

	pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
		self.detail = Some(detail);
		self
	}
}

impl Default for Fault {
	fn default() -> Self {
		Self::server("")
	}
}
