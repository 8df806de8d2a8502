pub use crate::claims::{ClaimsSource, RequestIdentity};
pub use crate::descriptor::IndexDescriptor;
pub use crate::identifiers::{IndexType, NamingPrefix, TenantId};
pub use crate::resolver::AccessResolver;
