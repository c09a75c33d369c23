//! In-process storage adapter.
//!
//! [`InMemoryCirculationStore`] implements the member, title and loan
//! repository ports over mutex-guarded maps and enforces the same rules as
//! the PostgreSQL schema: unique registration numbers and emails, loans
//! referencing existing rows, and `0 <= available_copies <= total_copies`.
//! Every operation runs under a single guard, so a loan issue's
//! check-decrement-insert is atomic with respect to concurrent callers.
//!
//! State lives only as long as the process. The server falls back to this
//! store when no database URL is configured.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use pagination::Page;

use crate::domain::ports::{
    LoanRepository, LoanRepositoryError, MemberRepository, MemberRepositoryError,
    TitleRepository, TitleRepositoryError,
};
use crate::domain::{
    Loan, LoanId, LoanListing, LoanReport, LoanReportQuery, LoanReportRow, Member, MemberId,
    NewLoan, NewMember, NewTitle, Title, TitleId,
};

#[derive(Debug, Default)]
struct StoreState {
    members: BTreeMap<MemberId, Member>,
    titles: BTreeMap<TitleId, Title>,
    loans: BTreeMap<LoanId, Loan>,
    last_member_id: i64,
    last_title_id: i64,
    last_loan_id: i64,
}

impl StoreState {
    fn listing_for(&self, loan: &Loan) -> Option<LoanListing> {
        let member = self.members.get(&loan.member_id)?;
        let title = self.titles.get(&loan.title_id)?;
        Some(LoanListing {
            loan_id: loan.id,
            member_id: member.id,
            member_name: member.name.clone(),
            title_id: title.id,
            title: title.title.clone(),
            loaned_at: loan.loaned_at,
            due_on: loan.due_on,
            status: loan.status,
        })
    }

    fn report_row_for(&self, loan: &Loan) -> Option<LoanReportRow> {
        let member = self.members.get(&loan.member_id)?;
        let title = self.titles.get(&loan.title_id)?;
        Some(LoanReportRow {
            loan_id: loan.id,
            registration_number: member.registration_number.clone(),
            title: title.title.clone(),
            loaned_on: loan.loaned_at.date_naive(),
            due_on: loan.due_on,
            status: loan.status,
        })
    }
}

/// Mutex-guarded in-process implementation of every repository port.
#[derive(Debug, Default)]
pub struct InMemoryCirculationStore {
    state: Mutex<StoreState>,
}

impl InMemoryCirculationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl MemberRepository for InMemoryCirculationStore {
    async fn insert(
        &self,
        member: &NewMember,
        registered_on: NaiveDate,
    ) -> Result<Member, MemberRepositoryError> {
        let mut state = self.lock().map_err(MemberRepositoryError::query)?;

        if state
            .members
            .values()
            .any(|existing| existing.registration_number == member.registration_number)
        {
            return Err(MemberRepositoryError::duplicate_registration_number(
                member.registration_number.as_ref(),
            ));
        }
        if let Some(email) = &member.email {
            let taken = state
                .members
                .values()
                .any(|existing| existing.email.as_ref() == Some(email));
            if taken {
                return Err(MemberRepositoryError::duplicate_email(email.as_ref()));
            }
        }

        state.last_member_id += 1;
        let id = MemberId::new(state.last_member_id);
        let stored = Member::from_new(id, member.clone(), registered_on);
        state.members.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_newest_first(&self) -> Result<Vec<Member>, MemberRepositoryError> {
        let state = self.lock().map_err(MemberRepositoryError::query)?;
        Ok(state.members.values().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, MemberRepositoryError> {
        let state = self.lock().map_err(MemberRepositoryError::query)?;
        Ok(state.members.get(&id).cloned())
    }
}

#[async_trait]
impl TitleRepository for InMemoryCirculationStore {
    async fn insert(&self, title: &NewTitle) -> Result<Title, TitleRepositoryError> {
        let mut state = self.lock().map_err(TitleRepositoryError::query)?;
        state.last_title_id += 1;
        let id = TitleId::new(state.last_title_id);
        let stored = Title::from_new(id, title.clone());
        state.titles.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_newest_first(&self) -> Result<Vec<Title>, TitleRepositoryError> {
        let state = self.lock().map_err(TitleRepositoryError::query)?;
        Ok(state.titles.values().rev().cloned().collect())
    }
}

#[async_trait]
impl LoanRepository for InMemoryCirculationStore {
    async fn issue(&self, loan: &NewLoan) -> Result<Loan, LoanRepositoryError> {
        let mut state = self.lock().map_err(LoanRepositoryError::query)?;

        let has_copy = state
            .titles
            .get(&loan.title_id)
            .is_some_and(Title::has_available_copy);
        if !has_copy {
            return Err(LoanRepositoryError::unavailable(loan.title_id.get()));
        }
        if !state.members.contains_key(&loan.member_id) {
            return Err(LoanRepositoryError::unknown_member(loan.member_id.get()));
        }

        if let Some(title) = state.titles.get_mut(&loan.title_id) {
            title.available_copies -= 1;
        }
        state.last_loan_id += 1;
        let id = LoanId::new(state.last_loan_id);
        let stored = Loan::from_new(id, *loan);
        state.loans.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_newest_first(&self) -> Result<Vec<LoanListing>, LoanRepositoryError> {
        let state = self.lock().map_err(LoanRepositoryError::query)?;
        state
            .loans
            .values()
            .rev()
            .map(|loan| {
                state.listing_for(loan).ok_or_else(|| {
                    LoanRepositoryError::query(format!("loan {} has dangling references", loan.id))
                })
            })
            .collect()
    }

    async fn report(&self, query: &LoanReportQuery) -> Result<LoanReport, LoanRepositoryError> {
        let state = self.lock().map_err(LoanRepositoryError::query)?;

        let mut matching: Vec<&Loan> = state
            .loans
            .values()
            .filter(|loan| query.includes(loan.loaned_at))
            .collect();
        matching.sort_by(|a, b| b.loaned_at.cmp(&a.loaned_at).then(b.id.cmp(&a.id)));

        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);
        let rows = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|loan| {
                state.report_row_for(loan).ok_or_else(|| {
                    LoanRepositoryError::query(format!("loan {} has dangling references", loan.id))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(rows, query.page, total))
    }
}
