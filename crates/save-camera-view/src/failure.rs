use core::fmt::Display;

use tracing::{debug, error};

pub fn report_and_panic<Err: Display>(error: Err, message: &str) -> ! {
    error!("{message}: {error}");

    eprintln!("ERROR:\n{message}.\nSee the logs for more details, the application will exit.");

    panic!("{message}: {error}");
}

pub fn report<Err: Display>(error: Err, message: &str) {
    error!("{message}: {error}");

    eprintln!("{message}.\n{error}");
}

pub trait Failure<T> {
    fn report_and_panic(self, message: &str) -> T;
    fn report(self, message: &str) -> Option<T>;
}

pub trait Ignore {
    fn ignore(self);
}

impl<T, E: Display> Failure<T> for Result<T, E> {
    fn report_and_panic(self, message: &str) -> T {
        match self {
            Ok(value) => value,
            Err(error) => report_and_panic(error, message),
        }
    }

    fn report(self, message: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                report(error, message);
                None
            }
        }
    }
}

impl<T> Failure<T> for Option<T> {
    fn report_and_panic(self, message: &str) -> T {
        match self {
            Some(value) => value,
            None => report_and_panic("Was None", message),
        }
    }

    fn report(self, message: &str) -> Self {
        match self {
            Some(value) => Some(value),
            None => {
                report("Was None", message);
                None
            }
        }
    }
}

impl<T> Ignore for Option<T> {
    #[track_caller]
    fn ignore(self) {
        if self.is_none() {
            debug!("Ignoring None ({})", core::panic::Location::caller());
        }
    }
}
