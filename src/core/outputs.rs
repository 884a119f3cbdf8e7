use crate::TestResult;
use serde::Serialize;
use std::boxed::Box;
use std::io::Write;
use std::time::Duration;

/// Report progress and save results while a test runs.
pub trait OutputEventHandler {
    /// Called when the kernel matrices have been computed.
    fn event_kernel_computed(
        &mut self,
        _bandwidths: &[f64],
        _duration: Duration,
    ) -> Result<(), failure::Error> {
        Ok(())
    }

    /// Called when all permuted statistics have been evaluated.
    fn event_permutations_completed(
        &mut self,
        _statistics: &[f64],
        _duration: Duration,
    ) -> Result<(), failure::Error> {
        Ok(())
    }

    /// Called once the decision has been made.
    fn event_test_completed(&mut self, _result: &TestResult) -> Result<(), failure::Error> {
        Ok(())
    }
}

pub struct CompositeOutputEventHandler<'life> {
    subloggers: Vec<Box<dyn OutputEventHandler + 'life>>,
}

impl<'life> CompositeOutputEventHandler<'life> {
    pub fn new() -> Self {
        let subloggers = Vec::new();
        Self { subloggers }
    }

    pub fn add(&mut self, logger: impl OutputEventHandler + 'life) {
        self.subloggers.push(Box::new(logger));
    }
}

impl std::default::Default for CompositeOutputEventHandler<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputEventHandler for CompositeOutputEventHandler<'_> {
    fn event_kernel_computed(
        &mut self,
        bandwidths: &[f64],
        duration: Duration,
    ) -> Result<(), failure::Error> {
        for logger in &mut self.subloggers {
            logger.event_kernel_computed(bandwidths, duration)?;
        }
        Ok(())
    }

    fn event_permutations_completed(
        &mut self,
        statistics: &[f64],
        duration: Duration,
    ) -> Result<(), failure::Error> {
        for logger in &mut self.subloggers {
            logger.event_permutations_completed(statistics, duration)?;
        }
        Ok(())
    }

    fn event_test_completed(&mut self, result: &TestResult) -> Result<(), failure::Error> {
        for logger in &mut self.subloggers {
            logger.event_test_completed(result)?;
        }
        Ok(())
    }
}

/// Entry point for all outputs of a test run.
/// Also keeps track of how long each phase took.
pub struct Output<'life> {
    base: CompositeOutputEventHandler<'life>,
    kernel_durations: Vec<Duration>,
    permutation_durations: Vec<Duration>,
}

impl<'life> Output<'life> {
    pub fn new() -> Self {
        let base = CompositeOutputEventHandler::new();
        Output {
            base,
            kernel_durations: Vec::new(),
            permutation_durations: Vec::new(),
        }
    }

    pub fn add(&mut self, logger: impl OutputEventHandler + 'life) {
        self.base.add(logger);
    }

    pub fn add_human_readable(&mut self, writer: impl Write + 'life) {
        self.add(HumanReadableOutput::new(writer));
    }

    pub fn add_csv_writer(&mut self, writer: impl Write + 'life) {
        self.add(CsvOutput::new(writer));
    }

    pub fn kernel_durations(&self) -> &[Duration] {
        &self.kernel_durations
    }

    pub fn permutation_durations(&self) -> &[Duration] {
        &self.permutation_durations
    }
}

impl std::default::Default for Output<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputEventHandler for Output<'_> {
    fn event_kernel_computed(
        &mut self,
        bandwidths: &[f64],
        duration: Duration,
    ) -> Result<(), failure::Error> {
        self.kernel_durations.push(duration);
        self.base.event_kernel_computed(bandwidths, duration)
    }

    fn event_permutations_completed(
        &mut self,
        statistics: &[f64],
        duration: Duration,
    ) -> Result<(), failure::Error> {
        self.permutation_durations.push(duration);
        self.base.event_permutations_completed(statistics, duration)
    }

    fn event_test_completed(&mut self, result: &TestResult) -> Result<(), failure::Error> {
        self.base.event_test_completed(result)
    }
}

/// Progress lines for humans.
pub struct HumanReadableOutput<W> {
    writer: W,
}

impl<W: Write> HumanReadableOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputEventHandler for HumanReadableOutput<W> {
    fn event_kernel_computed(
        &mut self,
        bandwidths: &[f64],
        duration: Duration,
    ) -> Result<(), failure::Error> {
        writeln!(
            self.writer,
            "[dckernel] kernel matrices computed with bandwidths {:.4?} in {:.2?}",
            bandwidths, duration,
        )?;
        Ok(())
    }

    fn event_permutations_completed(
        &mut self,
        statistics: &[f64],
        duration: Duration,
    ) -> Result<(), failure::Error> {
        writeln!(
            self.writer,
            "[dckernel] evaluated {} permutations in {:.2?}",
            statistics.len(),
            duration,
        )?;
        Ok(())
    }

    fn event_test_completed(&mut self, result: &TestResult) -> Result<(), failure::Error> {
        writeln!(
            self.writer,
            "[dckernel] {} = {:.6e}, threshold = {:.6e} (quantile {:.6e} + correction {:.6e}) => {}",
            result.statistic_name,
            result.statistic,
            result.threshold,
            result.quantile,
            result.correction,
            if result.reject { "reject H0" } else { "fail to reject H0" },
        )?;
        if result.corruptions > 0 && !result.fixed_bandwidth {
            writeln!(
                self.writer,
                "[dckernel] note: the median bandwidth depends on the data, \
                 so the corruption correction is only exact with a fixed --bandwidth",
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct PermutationRecord {
    permutation: usize,
    statistic: f64,
}

/// Writes every permuted statistic as one CSV row.
pub struct CsvOutput<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }
}

impl<W: Write> OutputEventHandler for CsvOutput<W> {
    fn event_permutations_completed(
        &mut self,
        statistics: &[f64],
        _duration: Duration,
    ) -> Result<(), failure::Error> {
        for (permutation, &statistic) in statistics.iter().enumerate() {
            self.writer.serialize(PermutationRecord {
                permutation,
                statistic,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
