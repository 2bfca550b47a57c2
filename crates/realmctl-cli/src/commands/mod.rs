//! Built-in management commands.

mod check_config;
mod list_realms;
mod list_users;
mod show_user;

use crate::command::ManagementCommand;

pub(crate) use check_config::CheckConfig;
pub(crate) use list_realms::ListRealms;
pub(crate) use list_users::ListUsers;
pub(crate) use show_user::ShowUser;

/// Every command the `realmctl` binary dispatches to.
pub(crate) fn builtin() -> Vec<Box<dyn ManagementCommand>> {
    vec![
        Box::new(CheckConfig),
        Box::new(ListRealms),
        Box::new(ListUsers),
        Box::new(ShowUser),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_command_names_are_unique() {
        let commands = builtin();
        let names: HashSet<&str> = commands.iter().map(|command| command.name()).collect();
        assert_eq!(names.len(), commands.len());
        assert!(names.contains("list-users"));
    }
}
