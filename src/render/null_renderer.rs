use crate::api::StreamingChart;
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartRenderer, UpdateMode};

/// No-op renderer used by tests and headless engine usage.
///
/// It records every call and still checks that element coordinates are not
/// infinite, so tests catch runaway scroll math before a real backend exists.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub update_count: usize,
    pub quiet_update_count: usize,
    pub render_count: usize,
    pub last_mode: Option<UpdateMode>,
    pub last_element_count: usize,
}

impl ChartRenderer for NullRenderer {
    fn update(&mut self, _chart: &mut StreamingChart, mode: UpdateMode) -> ChartResult<()> {
        self.update_count += 1;
        if mode == UpdateMode::Quiet {
            self.quiet_update_count += 1;
        }
        self.last_mode = Some(mode);
        Ok(())
    }

    fn render(&mut self, chart: &StreamingChart) -> ChartResult<()> {
        let mut element_count = 0;
        for meta in &chart.metas {
            for element in meta.elements.iter().chain(meta.dataset_element.as_ref()) {
                element_count += 1;
                if element.properties.values().any(|value| value.is_infinite()) {
                    return Err(ChartError::InvalidData(
                        "rendered element has an infinite coordinate".to_owned(),
                    ));
                }
            }
        }
        self.render_count += 1;
        self.last_element_count = element_count;
        Ok(())
    }
}
