use std::io::Write;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use domain::model::vo::Sample;
use domain::service::TextSource;
use futures::future::{join_all, try_join_all};
use infrastructure::sync::timer;
use service::gres::GresDialect;
use tracing::Instrument;

use crate::collector::{CollectContext, CollectorDescriptor};
use crate::infrastructure::exposition;
use crate::infrastructure::http::Snapshot;

#[derive(Debug)]
pub struct CollectorFailure {
    pub collector: &'static str,
    pub error: anyhow::Error,
}

/// Outcome of one cycle. Failed collectors contribute no samples.
#[derive(Debug, Default)]
pub struct CycleReport {
    pub samples: Vec<Sample>,
    pub failures: Vec<CollectorFailure>,
}

pub struct CollectionCycle {
    source: Arc<dyn TextSource>,
    collectors: Vec<CollectorDescriptor>,
    dialect: GresDialect,
    job_window: chrono::Duration,
}

impl CollectionCycle {
    pub fn new(
        source: Arc<dyn TextSource>,
        collectors: Vec<CollectorDescriptor>,
        dialect: GresDialect,
        job_window: chrono::Duration,
    ) -> Self {
        Self {
            source,
            collectors,
            dialect,
            job_window,
        }
    }

    /// Collects and renders a snapshot every `period`, replacing the one the
    /// scrape endpoint serves. A snapshot that fails to render keeps the
    /// previous one in place.
    pub async fn run(&self, period: Duration, snapshot: &Snapshot) {
        timer::every(period, || async move {
            let report = self.run_once().instrument(tracing::info_span!("collection_cycle")).await;
            match self.render(&report) {
                Ok(text) => snapshot.store(Some(Arc::new(text))),
                Err(e) => tracing::error!("Failed to render snapshot: {e:#}"),
            }
            ControlFlow::<()>::Continue(())
        })
        .await
    }

    /// Runs every collector concurrently. A failure only drops that collector.
    pub async fn run_once(&self) -> CycleReport {
        let ctx = CollectContext::builder()
            .dialect(self.dialect)
            .job_window(self.job_window)
            .build();
        let results = join_all(self.collectors.iter().map(|c| self.collect(c, &ctx))).await;

        let mut report = CycleReport::default();
        for (collector, result) in self.collectors.iter().zip(results) {
            match result {
                Ok(samples) => report.samples.extend(samples),
                Err(error) => {
                    report.failures.push(CollectorFailure {
                        collector: collector.name,
                        error,
                    });
                }
            }
        }
        tracing::debug!(
            samples = report.samples.len(),
            failures = report.failures.len(),
            "Cycle finished"
        );
        report
    }

    /// Logs the failed collectors and renders what the others produced.
    pub fn render(&self, report: &CycleReport) -> anyhow::Result<String> {
        for failure in &report.failures {
            tracing::error!(collector = failure.collector, "Collector failed: {:#}", failure.error);
        }
        exposition::render(&report.samples)
    }

    /// Prints the snapshot to stdout.
    pub fn publish(&self, report: &CycleReport) -> anyhow::Result<()> {
        let text = self.render(report)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes()).context("Failed to write snapshot")?;
        stdout.flush().context("Failed to write snapshot")
    }

    async fn collect(
        &self,
        collector: &CollectorDescriptor,
        ctx: &CollectContext,
    ) -> anyhow::Result<Vec<Sample>> {
        let queries = (collector.queries)(ctx);
        let outputs = try_join_all(queries.iter().map(|q| self.source.fetch(q))).await?;
        (collector.build)(&outputs, ctx)
            .with_context(|| format!("Failed to build {} metrics", collector.name))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use domain::model::vo::Query;
    use indoc::indoc;
    use mockall::predicate::function;

    use super::*;
    use crate::collector::Registry;
    use crate::infrastructure::exposition::series_value;

    mockall::mock! {
        Source {}

        #[async_trait]
        impl TextSource for Source {
            async fn fetch(&self, query: &Query) -> anyhow::Result<String>;
        }
    }

    fn cycle(source: MockSource, names: &[&str]) -> CollectionCycle {
        let registry = Registry::builtin();
        let collectors = names.iter().filter_map(|name| registry.get(name).copied()).collect();
        CollectionCycle::new(
            Arc::new(source),
            collectors,
            GresDialect::default(),
            chrono::Duration::hours(30),
        )
    }

    fn program(name: &'static str) -> impl Fn(&Query) -> bool {
        move |query: &Query| query.program == name
    }

    #[tokio::test]
    async fn samples_from_every_collector() {
        let mut source = MockSource::new();
        source
            .expect_fetch()
            .with(function(program("sdiag")))
            .returning(|_| Ok("Server thread count: 3\n".to_owned()));
        source
            .expect_fetch()
            .with(function(program("sinfo")))
            .returning(|_| Ok("2,idle\n".to_owned()));

        let report = cycle(source, &["scheduler", "nodes"]).run_once().await;
        assert!(report.failures.is_empty());
        let threads = report.samples.iter().find(|s| s.name == "slurm_scheduler_threads").unwrap();
        assert_eq!(threads.value, 3.0);
        let idle = report.samples.iter().find(|s| s.name == "slurm_nodes_idle").unwrap();
        assert_eq!(idle.value, 2.0);
    }

    #[tokio::test]
    async fn failed_collector_is_isolated() {
        let mut source = MockSource::new();
        source
            .expect_fetch()
            .with(function(program("squeue")))
            .returning(|_| Err(anyhow::anyhow!("squeue: error: Invalid user")));
        source
            .expect_fetch()
            .with(function(program("sinfo")))
            .returning(|_| Ok("5725/877/34/6636\n".to_owned()));

        let report = cycle(source, &["queue", "cpus"]).run_once().await;
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].collector, "queue");
        assert!(report.failures[0].error.to_string().contains("Invalid user"));
        assert!(report.samples.iter().all(|s| !s.name.starts_with("slurm_queue")));
        assert_eq!(report.samples.len(), 4);
    }

    #[tokio::test]
    async fn one_failed_query_fails_the_collector() {
        let mut source = MockSource::new();
        let pending = |q: &Query| q.args.iter().any(|a| a == "--states=PENDING");
        source
            .expect_fetch()
            .with(function(pending))
            .returning(|_| Err(anyhow::anyhow!("timed out")));
        source.expect_fetch().with(function(move |q: &Query| !pending(q))).returning(|query| {
            Ok(match query.program {
                "sinfo" => "batch,1/2/0/3\n".to_owned(),
                _ => "batch\n".to_owned(),
            })
        });

        let report = cycle(source, &["partition"]).run_once().await;
        assert_eq!(report.failures.len(), 1);
        assert!(report.samples.is_empty());
    }

    #[tokio::test]
    async fn partition_queries_join() {
        let mut source = MockSource::new();
        source.expect_fetch().returning(|query| {
            let out = match (query.program, query.args.last().map(String::as_str)) {
                ("sinfo", _) => "batch,1/2/0/3\ngpu,0/4/0/4\n",
                ("squeue", Some("--states=RUNNING")) => "batch\nbatch\n",
                ("squeue", _) => "gpu\nscavenger\n",
                _ => "",
            };
            Ok(out.to_owned())
        });

        let report = cycle(source, &["partition"]).run_once().await;
        let running: HashMap<_, _> = report
            .samples
            .iter()
            .filter(|s| s.name == "slurm_partition_jobs_running")
            .map(|s| (s.label_value("partition").unwrap().to_owned(), s.value))
            .collect();
        assert_eq!(running, HashMap::from([("batch".to_owned(), 2.0)]));
        assert!(report
            .samples
            .iter()
            .any(|s| s.name == "slurm_partition_jobs_pending" && s.label_value("partition") == Some("gpu")));
    }

    #[tokio::test]
    async fn rendered_snapshot() {
        let mut source = MockSource::new();
        source.expect_fetch().returning(|_| {
            Ok(indoc! {"
                12,PENDING,Dependency
                13,RUNNING,None
            "}
            .to_owned())
        });

        let report = cycle(source, &["queue"]).run_once().await;
        let text = exposition::render(&report.samples).unwrap();
        assert!(text.contains("# TYPE slurm_queue_pending gauge\n"));
        assert_eq!(series_value(&text, "slurm_queue_pending"), Some(1.0));
        assert_eq!(series_value(&text, "slurm_queue_pending_dependency"), Some(1.0));
        assert_eq!(series_value(&text, "slurm_queue_running"), Some(1.0));
        assert_eq!(series_value(&text, "slurm_queue_failed"), Some(0.0));
    }

    #[tokio::test(start_paused = true)]
    async fn run_stores_each_snapshot() {
        let mut source = MockSource::new();
        source.expect_fetch().returning(|_| Ok("5725/877/34/6636\n".to_owned()));
        let cycle = cycle(source, &["cpus"]);
        let snapshot = Snapshot::default();

        let run = cycle.run(Duration::from_secs(30), &snapshot);
        // the first tick fires at once; the timeout cuts the loop after it
        let _ = tokio::time::timeout(Duration::from_secs(1), run).await;

        let text = snapshot.load_full().unwrap();
        assert_eq!(series_value(&text, "slurm_cpus_alloc"), Some(5725.0));

    }
}
