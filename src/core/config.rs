use std::fmt;

use serde::Deserialize;
use tokio::time::Duration;

use crate::core::directory::HasherConfig;
use crate::core::{Profile, Role};

/// Session and directory configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    // Directory entries available at startup.
    #[serde(default = "demo_users")]
    pub users: Vec<UserEntry>,
    // Storage key holding the persisted identity.
    storage_key: Option<String>,
    // Simulated directory round trip.
    latency_milliseconds: Option<u64>,
    // Session request channel capacity.
    request_channel_buffer: Option<usize>,
    #[serde(default)]
    pub hasher: HasherConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            users: demo_users(),
            storage_key: None,
            latency_milliseconds: None,
            request_channel_buffer: None,
            hasher: HasherConfig::default(),
        }
    }
}

impl Config {
    pub const DEFAULT_STORAGE_KEY: &'static str = "scholars.user";
    const DEFAULT_LATENCY_MILLISECONDS: u64 = 800;
    const DEFAULT_REQUEST_CHANNEL_BUFFER: usize = 64;

    pub fn set_storage_key(&mut self, val: &mut Option<String>) {
        if let Some(val) = val.take() {
            self.storage_key = Some(val)
        }
    }
    pub fn set_latency_milliseconds(&mut self, val: Option<u64>) {
        if let Some(val) = val {
            self.latency_milliseconds = Some(val)
        }
    }
    pub fn set_request_channel_buffer(&mut self, val: Option<usize>) {
        if let Some(val) = val {
            self.request_channel_buffer = Some(std::cmp::max(val, 1))
        }
    }

    pub fn storage_key(&self) -> &str {
        self.storage_key
            .as_deref()
            .unwrap_or(Config::DEFAULT_STORAGE_KEY)
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(
            self.latency_milliseconds
                .unwrap_or(Config::DEFAULT_LATENCY_MILLISECONDS),
        )
    }

    pub fn request_channel_buffer(&self) -> usize {
        self.request_channel_buffer
            .unwrap_or(Config::DEFAULT_REQUEST_CHANNEL_BUFFER)
    }
}

/// Directory seed entry. `password` is hashed when the directory is built.
#[derive(Deserialize, Clone)]
pub struct UserEntry {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(flatten)]
    pub profile: Profile,
}

impl UserEntry {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role,
            profile: Profile::default(),
        }
    }
}

impl fmt::Debug for UserEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("UserEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .field("role", &self.role)
            .finish()
    }
}

// Demo accounts, one per role.
fn demo_users() -> Vec<UserEntry> {
    let strings = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<Vec<_>>();

    vec![
        UserEntry {
            id: Some("user-1".into()),
            profile: Profile {
                university: Some("Pacific Island University".into()),
                bio: Some(
                    "Computer Science student passionate about web development and machine learning."
                        .into(),
                ),
                skills: strings(&["JavaScript", "React", "Python", "Data Analysis"]),
                ..Default::default()
            },
            ..UserEntry::new(
                "John Smith",
                "student@example.com",
                "password123",
                Role::Student,
            )
        },
        UserEntry {
            id: Some("user-2".into()),
            profile: Profile {
                description: Some(
                    "A leading technology company focused on innovative solutions.".into(),
                ),
                industry: Some("Technology".into()),
                location: Some("San Francisco, CA".into()),
                website: Some("https://techinnovations.example.com".into()),
                desired_skills: strings(&["JavaScript", "React", "Node.js", "UX Design"]),
                ..Default::default()
            },
            ..UserEntry::new(
                "Tech Innovations Inc.",
                "organization@example.com",
                "password123",
                Role::Organization,
            )
        },
        UserEntry {
            id: Some("user-3".into()),
            profile: Profile {
                description: Some(
                    "A leading research university dedicated to academic excellence.".into(),
                ),
                location: Some("Honolulu, HI".into()),
                website: Some("https://isu.example.com".into()),
                programs: strings(&["Computer Science", "Business", "Marine Biology", "Engineering"]),
                ..Default::default()
            },
            ..UserEntry::new(
                "Island State University",
                "university@example.com",
                "password123",
                Role::University,
            )
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.storage_key(), "scholars.user");
        assert_eq!(config.latency(), Duration::from_millis(800));
        assert_eq!(config.users.len(), 3);
        assert_eq!(
            config.users.iter().map(|u| u.role).collect::<Vec<_>>(),
            Role::ALL.to_vec()
        );
    }

    #[test]
    fn deserialize_users_with_profile() {
        let yaml = r#"
users:
  - name: Jane
    email: jane@example.com
    password: secret1
    role: student
    skills: [Rust]
latency_milliseconds: 0
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.users.len(), 1);
        assert_eq!(config.users[0].profile.skills, vec!["Rust".to_owned()]);
        assert_eq!(config.latency(), Duration::ZERO);
        assert!(!format!("{:?}", config.users[0]).contains("secret1"));
    }

    #[test]
    fn override_values() {
        let mut config = Config::default();
        config.set_storage_key(&mut Some("other".into()));
        config.set_request_channel_buffer(Some(0));
        assert_eq!(config.storage_key(), "other");
        assert_eq!(config.request_channel_buffer(), 1);
    }
}
