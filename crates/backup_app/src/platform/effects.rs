use std::time::Duration;

use backup_core::{Effect, Msg};
use backup_engine::task::TaskRunner;
use backup_engine::{resolve_destination, ArchiveRunner, ConfigLoader, Poster, TaskError};
use engine_logging::engine_info;

/// Executes core effects: blocking steps go to the task runner, their
/// results come back as [`Msg`]s through the controller's inbox.
pub struct EffectRunner {
    tasks: TaskRunner<Msg>,
    loader: ConfigLoader,
    archiver: ArchiveRunner,
}

impl EffectRunner {
    pub fn new(tasks: TaskRunner<Msg>, loader: ConfigLoader) -> Self {
        Self {
            tasks,
            loader,
            archiver: ArchiveRunner::new(),
        }
    }

    /// Starts every task effect. Returns the exit code if an exit was requested.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Option<i32> {
        let mut exit = None;
        for effect in effects {
            match effect {
                Effect::LoadConfig { task } => {
                    engine_info!("LoadConfig task={} path={:?}", task, self.loader.path());
                    let loader = self.loader.clone();
                    self.tasks.run(
                        move || loader.load().map_err(|err| err.to_string()),
                        move |outcome| Msg::ConfigLoaded {
                            task,
                            result: flatten(outcome),
                        },
                    );
                }
                Effect::ResolveDestination { task, candidates } => {
                    engine_info!(
                        "ResolveDestination task={} candidates={}",
                        task,
                        candidates.len()
                    );
                    self.tasks.run(
                        move || resolve_destination(&candidates).map_err(|err| err.to_string()),
                        move |outcome| Msg::DestinationResolved {
                            task,
                            result: flatten(outcome),
                        },
                    );
                }
                Effect::RunArchive {
                    task,
                    config,
                    destination,
                } => {
                    engine_info!("RunArchive task={} destination={:?}", task, destination);
                    let archiver = self.archiver.clone();
                    self.tasks.run(
                        move || {
                            archiver
                                .run(&config, &destination)
                                .map_err(|err| err.to_string())
                        },
                        move |outcome| Msg::ArchiveFinished {
                            task,
                            result: flatten(outcome),
                        },
                    );
                }
                Effect::Exit { code } => {
                    engine_info!("Exit code={}", code);
                    exit = Some(code);
                }
            }
        }
        exit
    }

    pub fn poster(&self) -> Poster<Msg> {
        self.tasks.poster()
    }

    pub fn shutdown(self, timeout: Duration) {
        self.tasks.shutdown(timeout);
    }
}

/// Folds a task-boundary failure into the step's own failure message.
fn flatten<T>(outcome: Result<Result<T, String>, TaskError>) -> Result<T, String> {
    outcome.map_err(|err| err.to_string()).and_then(|result| result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_keeps_step_result() {
        assert_eq!(flatten(Ok(Ok::<_, String>(3))), Ok(3));
        assert_eq!(
            flatten(Ok(Err::<u8, _>("no location".to_string()))),
            Err("no location".to_string())
        );
    }

    #[test]
    fn flatten_reports_panics_as_failures() {
        let outcome: Result<Result<u8, String>, TaskError> =
            Err(TaskError::Panicked("boom".to_string()));
        assert_eq!(
            flatten(outcome),
            Err("background task panicked: boom".to_string())
        );
    }
}
