mod audit;
mod bundle;
mod identity;
mod recovery;
mod request;
mod response;
mod server;
mod session;
mod tool;

pub use audit::{AuditAction, AuditEntry};
pub use bundle::{BundleStep, GatherStrategy, TaskBundle};
pub use identity::{Permission, Preferences, Role, UserIdentity};
pub use recovery::{ErrorType, FailureDetail, RecoveryGuide};
pub use request::ToolRequest;
pub use response::{AgentOSResponse, ErrorDetail, ResponseMetadata};
pub use server::{ConnectionStatus, ServerConfig, ServerInfo};
pub use session::{InjectedContext, PendingAction, Session, SessionId};
pub use tool::{DetailLevel, ToolDescriptor, ToolFlags, ToolType};
