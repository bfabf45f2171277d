use kernel::id::{Id, markers};

pub type UserId = Id<markers::User>;
pub type SocialLoginId = Id<markers::SocialLogin>;
