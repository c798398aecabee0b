//! Site permission policy
//!
//! Rights derive from group membership through a configurable
//! `group -> rights` table. The implicit `*` group applies to every user.

use std::collections::{HashMap, HashSet};

pub const RIGHT_READ: &str = "read";
pub const RIGHT_EDIT: &str = "edit";
pub const RIGHT_CREATE_TALK: &str = "createtalk";
pub const RIGHT_UPLOAD: &str = "upload";
pub const RIGHT_UPLOAD_BY_URL: &str = "upload_by_url";
pub const RIGHT_DELETE: &str = "delete";

/// Everything the upload flows ask about site configuration and rights.
#[derive(Debug, Clone)]
pub struct SitePolicy {
    /// Master switch for any upload.
    pub uploads_enabled: bool,
    /// Whether uploads may copy from a URL at all.
    pub copy_uploads_enabled: bool,
    /// Whether copy uploads may be deferred to the job queue.
    pub async_uploads_enabled: bool,
    /// Group name to granted rights.
    pub group_permissions: HashMap<String, Vec<String>>,
}

impl Default for SitePolicy {
    fn default() -> Self {
        Self {
            uploads_enabled: true,
            copy_uploads_enabled: true,
            async_uploads_enabled: true,
            group_permissions: default_group_permissions(),
        }
    }
}

/// Rights granted out of the box: everyone reads, users edit and upload,
/// sysops may copy from URLs and delete.
pub fn default_group_permissions() -> HashMap<String, Vec<String>> {
    let mut map = HashMap::new();
    map.insert("*".to_string(), vec![RIGHT_READ.to_string()]);
    map.insert(
        "user".to_string(),
        vec![
            RIGHT_READ.to_string(),
            RIGHT_EDIT.to_string(),
            RIGHT_CREATE_TALK.to_string(),
            RIGHT_UPLOAD.to_string(),
        ],
    );
    map.insert(
        "sysop".to_string(),
        vec![
            RIGHT_READ.to_string(),
            RIGHT_EDIT.to_string(),
            RIGHT_CREATE_TALK.to_string(),
            RIGHT_UPLOAD.to_string(),
            RIGHT_UPLOAD_BY_URL.to_string(),
            RIGHT_DELETE.to_string(),
        ],
    );
    map
}

impl SitePolicy {
    /// All rights the given group memberships grant, `*` included.
    pub fn rights_for(&self, groups: &[String]) -> HashSet<&str> {
        let mut rights: HashSet<&str> = HashSet::new();
        if let Some(base) = self.group_permissions.get("*") {
            rights.extend(base.iter().map(String::as_str));
        }
        for group in groups {
            if let Some(granted) = self.group_permissions.get(group) {
                rights.extend(granted.iter().map(String::as_str));
            }
        }
        rights
    }

    pub fn user_can(&self, groups: &[String], right: &str) -> bool {
        self.rights_for(groups).contains(right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn everyone_gets_star_rights() {
        let policy = SitePolicy::default();
        assert!(policy.user_can(&[], RIGHT_READ));
        assert!(!policy.user_can(&[], RIGHT_UPLOAD));
    }

    #[test]
    fn plain_users_cannot_upload_by_url() {
        let policy = SitePolicy::default();
        let user = groups(&["user"]);
        assert!(policy.user_can(&user, RIGHT_UPLOAD));
        assert!(!policy.user_can(&user, RIGHT_UPLOAD_BY_URL));
    }

    #[test]
    fn sysops_can_upload_by_url_and_delete() {
        let policy = SitePolicy::default();
        let sysop = groups(&["user", "sysop"]);
        assert!(policy.user_can(&sysop, RIGHT_UPLOAD_BY_URL));
        assert!(policy.user_can(&sysop, RIGHT_DELETE));
    }

    #[test]
    fn unknown_groups_grant_nothing() {
        let policy = SitePolicy::default();
        assert!(!policy.user_can(&groups(&["bots"]), RIGHT_UPLOAD));
    }
}
