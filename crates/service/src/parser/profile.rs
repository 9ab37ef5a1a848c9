use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MentorProfile {
    pub id: String,
    pub name: String,
    pub qualifications: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenteeProfile {
    pub id: String,
    pub name: String,
    pub interests: Vec<String>,
}

/// Acknowledgement body shared by the profile and score endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub msg: String,
}
