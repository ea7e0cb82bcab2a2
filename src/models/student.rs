use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub major: String,
    pub year: u32,
    pub gpa: f32,
    pub avatar: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub is_online: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub major: Option<String>,
    pub year: Option<u32>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub birthdate: Option<String>,
}

impl Student {
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(major) = update.major {
            self.major = major;
        }
        if let Some(year) = update.year {
            self.year = year;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
        if let Some(bio) = update.bio {
            self.bio = Some(bio);
        }
        if let Some(birthdate) = update.birthdate {
            self.birthdate = Some(birthdate);
        }
    }
}
