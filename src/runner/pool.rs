//! Bounded worker pool for invocations
//!
//! Every invocation is spawned as its own tokio task up front. A semaphore
//! caps how many shells run at once; tasks beyond the cap wait for a slot.
//! The pool waits for all tasks unless the interrupt future resolves first,
//! in which case it closes the semaphore, detaches whatever is still
//! running and returns right away.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::RunnerError;
use crate::executor::ShellCommand;

use super::invocation::Invocation;
use super::traits::OutputSink;

/// How a pool run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolExit {
    /// Every task ran to completion
    Completed { finished: usize },
    /// The interrupt fired; `abandoned` tasks were still queued or running
    Interrupted { abandoned: usize },
}

/// Runs invocations concurrently, writing each block to a shared sink
pub struct CommandPool {
    shell: ShellCommand,
    workers: usize,
    sink: Arc<dyn OutputSink>,
}

impl CommandPool {
    /// Create a pool; `workers` is clamped to at least one
    pub fn new(shell: ShellCommand, workers: usize, sink: Arc<dyn OutputSink>) -> Self {
        Self {
            shell,
            workers: workers.max(1),
            sink,
        }
    }

    /// Submit all invocations and wait for them or for `interrupt`
    pub async fn run<F>(&self, invocations: Vec<Invocation>, interrupt: F) -> PoolExit
    where
        F: Future<Output = ()>,
    {
        let slots = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        tracing::debug!(
            count = invocations.len(),
            workers = self.workers,
            "submitting invocations"
        );

        for invocation in invocations {
            let slots = Arc::clone(&slots);
            let shell = self.shell.clone();
            let sink = Arc::clone(&self.sink);

            tasks.spawn(async move {
                // A closed semaphore means the pool was interrupted before this one started
                let Ok(_slot) = slots.acquire_owned().await else {
                    tracing::debug!(name = %invocation.name, "dropped before start");
                    return;
                };

                if let Err(e) = invocation.execute(&shell, sink.as_ref()).await {
                    tracing::warn!(
                        name = %invocation.name,
                        kind = e.kind(),
                        error = %e,
                        "invocation failed"
                    );
                }
            });
        }

        tokio::pin!(interrupt);
        let mut finished = 0;

        loop {
            tokio::select! {
                joined = tasks.join_next() => match joined {
                    Some(Ok(())) => finished += 1,
                    Some(Err(e)) => {
                        let err = RunnerError::Join(e.to_string());
                        tracing::warn!(kind = err.kind(), error = %err, "pool task lost");
                        finished += 1;
                    }
                    None => return PoolExit::Completed { finished },
                },
                () = &mut interrupt => {
                    slots.close();
                    let abandoned = tasks.len();
                    tasks.detach_all();
                    tracing::info!(abandoned, "interrupted, not waiting for running commands");
                    return PoolExit::Interrupted { abandoned };
                }
            }
        }
    }
}

/// Resolves on Ctrl-C; never resolves if the handler can't be installed
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for interrupt");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct MemorySink {
        blocks: Mutex<Vec<String>>,
    }

    impl OutputSink for MemorySink {
        fn write_block(&self, block: &str) -> io::Result<()> {
            self.blocks.lock().unwrap().push(block.to_string());
            Ok(())
        }
    }

    fn pool(workers: usize) -> (CommandPool, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::default());
        let pool = CommandPool::new(ShellCommand::new("sh", "-c"), workers, sink.clone());
        (pool, sink)
    }

    fn never() -> std::future::Pending<()> {
        std::future::pending()
    }

    #[tokio::test]
    async fn test_zero_workers_still_runs() {
        let (pool, sink) = pool(0);
        let invocations = vec![
            Invocation::new("echo one", "a"),
            Invocation::new("echo two", "b"),
        ];

        let exit = tokio::time::timeout(Duration::from_secs(5), pool.run(invocations, never()))
            .await
            .expect("a zero-worker pool must still make progress");

        assert_eq!(exit, PoolExit::Completed { finished: 2 });
        assert_eq!(sink.blocks.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_run_writes_every_block() {
        let (pool, sink) = pool(4);
        let invocations = vec![
            Invocation::new("printf 'a\\nb\\n'", "X"),
            Invocation::new("echo bye", "echo bye"),
        ];

        let exit = pool.run(invocations, never()).await;

        assert_eq!(exit, PoolExit::Completed { finished: 2 });
        let mut blocks = sink.blocks.lock().unwrap().clone();
        blocks.sort();
        assert_eq!(blocks, vec!["[X] a\n[X] b".to_string(), "[echo bye] bye".to_string()]);
    }

    #[tokio::test]
    async fn test_run_failure_does_not_halt_others() {
        let (pool, sink) = pool(2);
        let invocations = vec![
            Invocation::new("exit 1", "fail"),
            Invocation::new("echo ok", "ok"),
        ];

        let exit = pool.run(invocations, never()).await;

        assert_eq!(exit, PoolExit::Completed { finished: 2 });
        assert_eq!(*sink.blocks.lock().unwrap(), vec!["[ok] ok".to_string()]);
    }

    #[tokio::test]
    async fn test_run_single_worker_completes_all() {
        let (pool, sink) = pool(1);
        let invocations = (0..5)
            .map(|i| Invocation::new(format!("echo {}", i), format!("n{}", i)))
            .collect();

        let exit = pool.run(invocations, never()).await;

        assert_eq!(exit, PoolExit::Completed { finished: 5 });
        assert_eq!(sink.blocks.lock().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_run_spawn_failure_is_contained() {
        let sink = Arc::new(MemorySink::default());
        let shell = ShellCommand::new("nonexistent_shell_12345", "-c");
        let pool = CommandPool::new(shell, 2, sink.clone());

        let exit = pool.run(vec![Invocation::new("echo hi", "hi")], never()).await;

        assert_eq!(exit, PoolExit::Completed { finished: 1 });
        assert!(sink.blocks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_interrupt_returns_without_waiting() {
        let (pool, sink) = pool(2);
        let invocations = vec![
            Invocation::new("sleep 5; echo late", "slow"),
            Invocation::new("sleep 5; echo late", "slower"),
        ];

        let exit = tokio::time::timeout(
            Duration::from_secs(3),
            pool.run(invocations, tokio::time::sleep(Duration::from_millis(200))),
        )
        .await
        .expect("pool should return promptly after interrupt");

        assert_eq!(exit, PoolExit::Interrupted { abandoned: 2 });
        assert!(sink.blocks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_interrupt_drops_queued_invocations() {
        let (pool, sink) = pool(1);
        let invocations = vec![
            Invocation::new("sleep 5", "running"),
            Invocation::new("echo never", "queued"),
        ];

        let exit = pool
            .run(invocations, tokio::time::sleep(Duration::from_millis(200)))
            .await;
        assert_eq!(exit, PoolExit::Interrupted { abandoned: 2 });

        // The queued task sees the closed semaphore and exits without running
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(sink.blocks.lock().unwrap().is_empty());
    }
}
