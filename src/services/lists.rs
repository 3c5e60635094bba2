//! Loaders for the list pages: fetch, filter, paginate, assemble.

use serde::Serialize;

use crate::domain::broker::{BROKER_LIST_VIEW, Broker};
use crate::domain::certificate::{CERTIFICATE_LIST_VIEW, Certificate};
use crate::domain::client::{CLIENT_LIST_VIEW, Client};
use crate::domain::company::{COMPANY_LIST_VIEW, Company};
use crate::domain::record::Record;
use crate::domain::user::{USER_LIST_VIEW, User};
use crate::dto::list::{ListPageData, ListQuery};
use crate::list_view::ListViewSpec;
use crate::pagination::Paginated;
use crate::repository::{BrokerReader, CertificateReader, ClientReader, CompanyReader, UserReader};
use crate::services::{ListViewKind, ServiceResult};

/// Runs the list-view pipeline over `records` and builds the page data.
pub fn load_list_page<T>(
    records: Vec<T>,
    view: &ListViewSpec,
    query: &ListQuery,
    default_per_page: usize,
) -> ListPageData<T>
where
    T: Record + Clone,
{
    let requested = query.page_state(default_per_page);
    let page = view.apply(&records, &query.filters, requested);
    if page.page.current_page != requested.current_page {
        log::debug!(
            "Page {} out of range, showing page {} of {}",
            requested.current_page,
            page.page.current_page,
            page.total_pages
        );
    }

    let search_query = Some(query.filters.search_term.clone()).filter(|s| !s.is_empty());

    ListPageData {
        records: Paginated::from_page(&page),
        total: page.total,
        search_query,
        tag: query.filters.active_tag().map(str::to_string),
        tag_options: view.tag_options(&records),
        date_range: query.filters.date_range,
    }
}

pub fn load_users_page<R>(
    repo: &R,
    query: &ListQuery,
    default_per_page: usize,
) -> ServiceResult<ListPageData<User>>
where
    R: UserReader + ?Sized,
{
    let users = repo.list_users().map_err(|err| {
        log::error!("Failed to load users: {err}");
        err
    })?;
    Ok(load_list_page(users, &USER_LIST_VIEW, query, default_per_page))
}

pub fn load_clients_page<R>(
    repo: &R,
    query: &ListQuery,
    default_per_page: usize,
) -> ServiceResult<ListPageData<Client>>
where
    R: ClientReader + ?Sized,
{
    let clients = repo.list_clients().map_err(|err| {
        log::error!("Failed to load clients: {err}");
        err
    })?;
    Ok(load_list_page(clients, &CLIENT_LIST_VIEW, query, default_per_page))
}

pub fn load_companies_page<R>(
    repo: &R,
    query: &ListQuery,
    default_per_page: usize,
) -> ServiceResult<ListPageData<Company>>
where
    R: CompanyReader + ?Sized,
{
    let companies = repo.list_companies().map_err(|err| {
        log::error!("Failed to load companies: {err}");
        err
    })?;
    Ok(load_list_page(companies, &COMPANY_LIST_VIEW, query, default_per_page))
}

pub fn load_brokers_page<R>(
    repo: &R,
    query: &ListQuery,
    default_per_page: usize,
) -> ServiceResult<ListPageData<Broker>>
where
    R: BrokerReader + ?Sized,
{
    let brokers = repo.list_brokers().map_err(|err| {
        log::error!("Failed to load brokers: {err}");
        err
    })?;
    Ok(load_list_page(brokers, &BROKER_LIST_VIEW, query, default_per_page))
}

pub fn load_certificates_page<R>(
    repo: &R,
    query: &ListQuery,
    default_per_page: usize,
) -> ServiceResult<ListPageData<Certificate>>
where
    R: CertificateReader + ?Sized,
{
    let certificates = repo.list_certificates().map_err(|err| {
        log::error!("Failed to load certificates: {err}");
        err
    })?;
    Ok(load_list_page(
        certificates,
        &CERTIFICATE_LIST_VIEW,
        query,
        default_per_page,
    ))
}

fn to_json<T: Serialize>(data: &ListPageData<T>) -> ServiceResult<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Loads any list page and renders it as pretty-printed JSON.
pub fn render_list_page_json<R>(
    repo: &R,
    kind: ListViewKind,
    query: &ListQuery,
    default_per_page: usize,
) -> ServiceResult<String>
where
    R: UserReader + ClientReader + CompanyReader + BrokerReader + CertificateReader + ?Sized,
{
    match kind {
        ListViewKind::Users => to_json(&load_users_page(repo, query, default_per_page)?),
        ListViewKind::Clients => to_json(&load_clients_page(repo, query, default_per_page)?),
        ListViewKind::Companies => to_json(&load_companies_page(repo, query, default_per_page)?),
        ListViewKind::Brokers => to_json(&load_brokers_page(repo, query, default_per_page)?),
        ListViewKind::Certificates => {
            to_json(&load_certificates_page(repo, query, default_per_page)?)
        }
    }
}
