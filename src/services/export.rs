//! CSV export of a filtered list view.

use std::io::Write;

use crate::domain::record::Record;
use crate::list_view::{FilterState, ListViewSpec};
use crate::repository::{BrokerReader, CertificateReader, ClientReader, CompanyReader, UserReader};
use crate::services::{ListViewKind, ServiceResult};

/// Writes every record that passes `filters` (all pages) as CSV.
///
/// The header row is `columns`; missing fields are written as empty cells.
/// Returns the number of data rows written.
pub fn export_csv<T, W>(
    records: &[T],
    view: &ListViewSpec,
    filters: &FilterState,
    columns: &[&str],
    writer: W,
) -> ServiceResult<usize>
where
    T: Record,
    W: Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(columns)?;

    let rows = view.filter(records, filters);
    for record in &rows {
        csv_writer.write_record(columns.iter().map(|column| {
            record
                .field(column)
                .map(|value| value.as_text().into_owned())
                .unwrap_or_default()
        }))?;
    }
    csv_writer.flush()?;

    Ok(rows.len())
}

/// Loads the records of `kind` and exports the filtered set as CSV.
pub fn export_list_view<R, W>(
    repo: &R,
    kind: ListViewKind,
    filters: &FilterState,
    writer: W,
) -> ServiceResult<usize>
where
    R: UserReader + ClientReader + CompanyReader + BrokerReader + CertificateReader + ?Sized,
    W: Write,
{
    let view = kind.spec();
    let columns = kind.export_columns();
    let written = match kind {
        ListViewKind::Users => export_csv(&repo.list_users()?, view, filters, columns, writer)?,
        ListViewKind::Clients => export_csv(&repo.list_clients()?, view, filters, columns, writer)?,
        ListViewKind::Companies => {
            export_csv(&repo.list_companies()?, view, filters, columns, writer)?
        }
        ListViewKind::Brokers => export_csv(&repo.list_brokers()?, view, filters, columns, writer)?,
        ListViewKind::Certificates => {
            export_csv(&repo.list_certificates()?, view, filters, columns, writer)?
        }
    };
    log::info!("Exported {written} {kind} rows");
    Ok(written)
}
