//! End-to-end scans against sockets on the loopback interface.

#[cfg(test)]
mod scan;
#[cfg(test)]
mod util;
