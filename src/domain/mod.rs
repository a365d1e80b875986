//! Search intent, response model and session state live here.

pub mod entities;
pub mod intent;
pub mod platform;
pub mod response;
pub mod session;

#[allow(unused_imports)]
pub use entities::{AnalysisSummary, ListingResult, PlatformFee, SearchRequest};
#[allow(unused_imports)]
pub use intent::{parse_numeric_field, PlatformPolicy, SearchIntent, ValidationError};
pub use platform::PlatformId;
#[allow(unused_imports)]
pub use response::{NormalizedResponse, SearchEnvelope, SearchResponse};
#[allow(unused_imports)]
pub use session::{
    Completion, RequestTicket, ResultSession, SessionStatus, SortKey,
    SubmitRejected, TRANSPORT_FAILURE_MESSAGE,
};
