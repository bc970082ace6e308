#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UnitConfig {
    #[serde(default = "defaults::thread_name_prefix")]
    pub thread_name_prefix: String,
    #[serde(default = "defaults::thread_stack_size")]
    pub thread_stack_size:  usize,
    #[serde(default = "defaults::enable_time")]
    pub enable_time:        bool,
}

mod defaults {
    use super::UnitConfig;

    pub(super) fn thread_name_prefix() -> String {
        "troupe-unit".into()
    }
    pub(super) fn thread_stack_size() -> usize {
        2 * 1024 * 1024
    }
    pub(super) fn enable_time() -> bool {
        true
    }

    impl Default for UnitConfig {
        fn default() -> Self {
            Self {
                thread_name_prefix: thread_name_prefix(),
                thread_stack_size:  thread_stack_size(),
                enable_time:        enable_time(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(
        UnitConfig::default(),
        "{}"
        ; "everything defaulted"
    )]
    #[test_case(
        UnitConfig {
            thread_name_prefix: "calc".into(),
            thread_stack_size: 65536,
            ..Default::default()
        },
        r#"
            thread_name_prefix: calc
            thread_stack_size: 65536
        "#
        ; "name and stack"
    )]
    fn should_deserialize(expected: UnitConfig, yaml: &str) {
        assert_eq!(serde_yaml::from_str::<UnitConfig>(yaml).unwrap(), expected);
    }
}
