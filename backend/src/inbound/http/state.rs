//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    Catalog, LoanIssuer, LoanRepository, LoanReporting, MemberRegistry, MemberRepository,
    TitleRepository,
};
use crate::domain::{CatalogService, LoanIssuerService, LoanReportingService, MemberRegistryService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub members: Arc<dyn MemberRegistry>,
    pub catalog: Arc<dyn Catalog>,
    pub loans: Arc<dyn LoanIssuer>,
    pub reports: Arc<dyn LoanReporting>,
}

impl HttpState {
    /// Construct state from already-built driving ports.
    pub fn new(
        members: Arc<dyn MemberRegistry>,
        catalog: Arc<dyn Catalog>,
        loans: Arc<dyn LoanIssuer>,
        reports: Arc<dyn LoanReporting>,
    ) -> Self {
        Self {
            members,
            catalog,
            loans,
            reports,
        }
    }

    /// Wire the domain services over a set of repository adapters.
    ///
    /// The same adapter may back several ports; the in-process store
    /// implements all three.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use circulation::inbound::http::state::HttpState;
    /// use circulation::outbound::memory::InMemoryCirculationStore;
    ///
    /// let store = Arc::new(InMemoryCirculationStore::new());
    /// let state = HttpState::from_repositories(
    ///     Arc::clone(&store),
    ///     Arc::clone(&store),
    ///     store,
    ///     Arc::new(mockable::DefaultClock),
    /// );
    /// let _reports = state.reports.clone();
    /// ```
    pub fn from_repositories<M, T, L>(
        members: Arc<M>,
        titles: Arc<T>,
        loans: Arc<L>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        M: MemberRepository + 'static,
        T: TitleRepository + 'static,
        L: LoanRepository + 'static,
    {
        Self {
            members: Arc::new(MemberRegistryService::new(
                Arc::clone(&members),
                Arc::clone(&clock),
            )),
            catalog: Arc::new(CatalogService::new(titles)),
            loans: Arc::new(LoanIssuerService::new(members, Arc::clone(&loans), clock)),
            reports: Arc::new(LoanReportingService::new(loans)),
        }
    }
}
