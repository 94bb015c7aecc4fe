//! Paging message handlers (page requests, arrivals, sentinel, reset)

use crate::commands::Cmd;
use crate::grid::{Completion, PageResponse};
use crate::messages::DataMsg;
use crate::model::GridModel;

/// Handle paging messages
pub fn update_data(model: &mut GridModel, msg: DataMsg) -> Option<Cmd> {
    match msg {
        DataMsg::RequestNextPage => request_next_page(model),

        DataMsg::SentinelVisible => {
            if model.search.is_active() {
                tracing::debug!(
                    "Sentinel visible while searching for {:?}; not loading",
                    model.search.term()
                );
                return None;
            }
            if !model.can_load() {
                return None;
            }
            request_next_page(model)
        }

        DataMsg::PageLoaded(response) => page_loaded(model, response),

        DataMsg::Reset => {
            tracing::info!(
                "Resetting grid ({} rows dropped)",
                model.loaded_count()
            );
            model.clear_rows();
            model.loader.reset();
            Cmd::merge(Some(Cmd::Redraw), request_next_page(model))
        }
    }
}

fn request_next_page(model: &mut GridModel) -> Option<Cmd> {
    let loaded = model.loaded_count();
    model
        .loader
        .request_next_page(loaded)
        .map(|request| Cmd::batch(vec![Cmd::FetchPage(request), Cmd::Redraw]))
}

fn page_loaded(model: &mut GridModel, response: PageResponse) -> Option<Cmd> {
    let request = match model.loader.complete(response.generation, response.seq) {
        Completion::Accepted(request) => request,
        Completion::Stale => return None,
    };

    match response.result {
        Ok(rows) => {
            let received = rows.len();
            let appended = model.append_page(rows, request.rows);
            model.last_error = None;
            tracing::info!(
                "Page {} loaded: {} rows ({} received), {} of {} total",
                request.seq,
                appended,
                received,
                model.loaded_count(),
                model.total_rows()
            );
        }
        Err(e) => {
            tracing::warn!("Page {} failed: {}", request.seq, e);
            model.last_error = Some(e);
        }
    }

    Some(Cmd::Redraw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::grid::MonospaceMeasurer;
    use crate::model::Row;
    use crate::source::FetchError;

    fn model(page_size: usize, total_rows: usize) -> GridModel {
        let config = GridConfig {
            page_size,
            total_rows,
            ..GridConfig::default()
        };
        GridModel::new(config, Box::new(MonospaceMeasurer::new(1.0)))
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n).map(|i| Row::new().with("id", i as i64)).collect()
    }

    #[test]
    fn test_request_while_loading_is_dropped() {
        let mut model = model(10, 100);
        let first = update_data(&mut model, DataMsg::RequestNextPage);
        assert_eq!(first.map(|c| c.fetches().len()), Some(1));

        for _ in 0..5 {
            assert_eq!(update_data(&mut model, DataMsg::RequestNextPage), None);
        }
    }

    #[test]
    fn test_surplus_rows_are_truncated() {
        let mut model = model(10, 15);
        let cmd = update_data(&mut model, DataMsg::RequestNextPage).unwrap();
        let request = cmd.fetches()[0].clone();

        let response = PageResponse::for_request(&request, Ok(rows(25)));
        update_data(&mut model, DataMsg::PageLoaded(response));
        assert_eq!(model.loaded_count(), 10);
    }

    #[test]
    fn test_failure_sets_error_and_returns_to_idle() {
        let mut model = model(10, 100);
        let cmd = update_data(&mut model, DataMsg::RequestNextPage).unwrap();
        let request = cmd.fetches()[0].clone();

        let response =
            PageResponse::for_request(&request, Err(FetchError::Network("timeout".into())));
        update_data(&mut model, DataMsg::PageLoaded(response));

        assert!(!model.is_loading());
        assert_eq!(model.loaded_count(), 0);
        assert!(model.last_error().is_some());
    }
}
