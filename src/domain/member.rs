use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub fullname: String,
    pub code: String,
    pub nickname: String,
    pub image_url: String,
}

impl Member {
    /// Avatar placeholder: first letter of the nickname, else of the full name.
    pub fn avatar_fallback(&self) -> Option<char> {
        self.nickname
            .chars()
            .next()
            .or_else(|| self.fullname.chars().next())
    }

    /// "nickname (code)" caption under the name
    pub fn caption(&self) -> String {
        format!("{} ({})", self.nickname, self.code)
    }
}
