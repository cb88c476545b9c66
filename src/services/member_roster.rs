use tracing::debug;

use super::error_handling::BoardError;
use super::list_store::ListStore;
use super::notifications::Notifier;
use crate::domain::Member;
use crate::repository::member_repository::MemberRepository;

/// Read-only member list, fetched once per roster.
pub struct MemberRoster {
    members: MemberRepository,
    store: ListStore<Member>,
    notifier: Notifier,
}

impl MemberRoster {
    pub fn new(members: MemberRepository) -> Self {
        Self {
            members,
            store: ListStore::new(),
            notifier: Notifier::new(),
        }
    }

    /// Fetch the roster unless it was already loaded.
    pub async fn ensure_loaded(&mut self) -> Result<(), BoardError> {
        if self.store.has_loaded() {
            debug!("Member roster already loaded");
            return Ok(());
        }
        let members = &self.members;
        if let Err(e) = self.store.refresh(|| members.list()).await {
            self.notifier.error("fetch members", &e, "Failed to fetch members");
            return Err(e);
        }
        Ok(())
    }

    pub fn members(&self) -> &[Member] {
        self.store.items()
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }
}
