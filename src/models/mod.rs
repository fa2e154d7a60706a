// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CompanySize, MatchReason, MatchResult, MatchStatus, NewProfile, NewTradeMatch, ProfileId,
    ScoredMatch, ScoringWeights, TradeMatch, TradeMatchId, TradeProfile, UserType,
};
pub use requests::{
    AdminAction, AdminActionRequest, ConnectRequest, FindMatchesRequest, MatchListQuery,
    MatchStatusRequest, MatchesQuery, RegisterRequest, UpdateProfileRequest, UserListQuery,
};
pub use responses::{
    ActionResponse, ErrorResponse, FindMatchesResponse, HealthResponse, MatchView,
    ReferenceResponse, UserDetailResponse,
};
