#[cfg(test)]
mod common;

#[cfg(test)]
mod backend_client_tests;

#[cfg(test)]
mod send_workflow_tests;
