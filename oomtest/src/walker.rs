//! Coverage walker
//!
//! For each port: read every key, read every function, write back every
//! writable key. Values are never checked; the walk passes when no accessor
//! fails. The first failure ends the walk and is returned unchanged.

use oom_core::{OomApi, Port, Result};
use std::io::Write;
use tracing::{debug, info};

/// Accessor calls issued during a walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Ports visited
    pub ports: usize,
    /// `read_value` calls, including the reads before write-back
    pub value_reads: usize,
    /// `read_block` calls
    pub block_reads: usize,
    /// `write_value` calls
    pub writes: usize,
}

/// Per-port diagnostic line
pub fn diagnostic_line(port: &Port) -> String {
    format!(
        "{} raw memory reads for port {}",
        port.readcount(),
        port.port_name
    )
}

/// Walks every advertised key of every port
pub struct CoverageWalker<'a, A: OomApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: OomApi + ?Sized> CoverageWalker<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Walk all ports, writing one diagnostic line per port to `out`
    ///
    /// Lines for ports finished before a failure have already been written
    /// when the error is returned.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<WalkSummary> {
        let ports = self.api.list_ports()?;
        info!("Walking {} port(s)", ports.len());

        let mut summary = WalkSummary::default();
        for port in &ports {
            self.walk_port(port, &mut summary)?;
            writeln!(out, "{}", diagnostic_line(port))?;
            out.flush()?;
            summary.ports += 1;
        }

        info!(
            "Walk complete: {} port(s), {} value read(s), {} block read(s), {} write(s)",
            summary.ports, summary.value_reads, summary.block_reads, summary.writes
        );
        Ok(summary)
    }

    fn walk_port(&self, port: &Port, summary: &mut WalkSummary) -> Result<()> {
        debug!(
            "Port {} ({}): {} keys, {} functions, {} writable",
            port.port_name,
            port.port_type,
            port.mmap.len(),
            port.fmap.len(),
            port.wmap.len()
        );

        for key in &port.mmap {
            self.api.read_value(port, key)?;
            summary.value_reads += 1;
        }

        for key in &port.fmap {
            self.api.read_block(port, key)?;
            summary.block_reads += 1;
        }

        // Read the current value and write it back unchanged
        for key in &port.wmap {
            let value = self.api.read_value(port, key)?;
            summary.value_reads += 1;
            self.api.write_value(port, key, &value)?;
            summary.writes += 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oom_core::{OomError, PortType, Value};
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        ReadValue(String, String),
        ReadBlock(String, String),
        WriteValue(String, String, Value),
    }

    struct PortSetup {
        name: &'static str,
        mmap: Vec<&'static str>,
        fmap: Vec<&'static str>,
        wmap: Vec<&'static str>,
    }

    /// Mock API for testing the walker without modules
    ///
    /// Each read bumps the port's readcount by one and returns a value
    /// naming the port and key, so write-backs can be traced to their read.
    #[derive(Default)]
    struct MockApi {
        ports: Vec<PortSetup>,
        /// `(port, key)` whose access fails with a transport error
        fail_on: Option<(&'static str, &'static str)>,
        fail_list: bool,
        calls: RefCell<Vec<Call>>,
    }

    impl MockApi {
        fn with_ports(ports: Vec<PortSetup>) -> Self {
            Self {
                ports,
                ..Default::default()
            }
        }

        fn check(&self, port: &Port, key: &str) -> Result<()> {
            match self.fail_on {
                Some((p, k)) if p == port.port_name && k == key => {
                    Err(OomError::Transport(format!("read of {} failed", key)))
                }
                _ => Ok(()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl OomApi for MockApi {
        fn list_ports(&self) -> Result<Vec<Port>> {
            if self.fail_list {
                return Err(OomError::Transport("no shim".to_string()));
            }
            Ok(self
                .ports
                .iter()
                .map(|setup| {
                    Port::new(setup.name, PortType::Sfp)
                        .with_mmap(setup.mmap.iter().copied())
                        .with_fmap(setup.fmap.iter().copied())
                        .with_wmap(setup.wmap.iter().copied())
                })
                .collect())
        }

        fn read_value(&self, port: &Port, key: &str) -> Result<Value> {
            self.calls
                .borrow_mut()
                .push(Call::ReadValue(port.port_name.clone(), key.to_string()));
            self.check(port, key)?;
            port.record_read();
            Ok(Value::Str(format!("{}:{}", port.port_name, key)))
        }

        fn read_block(&self, port: &Port, key: &str) -> Result<Vec<u8>> {
            self.calls
                .borrow_mut()
                .push(Call::ReadBlock(port.port_name.clone(), key.to_string()));
            self.check(port, key)?;
            port.record_read();
            Ok(vec![0xAA; 4])
        }

        fn write_value(&self, port: &Port, key: &str, value: &Value) -> Result<()> {
            self.calls.borrow_mut().push(Call::WriteValue(
                port.port_name.clone(),
                key.to_string(),
                value.clone(),
            ));
            Ok(())
        }
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_no_ports_no_calls_no_output() {
        let api = MockApi::default();
        let mut out = Vec::new();

        let summary = CoverageWalker::new(&api).run(&mut out).unwrap();

        assert_eq!(summary, WalkSummary::default());
        assert!(api.calls().is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_port_two_reads_one_write() {
        let api = MockApi::with_ports(vec![PortSetup {
            name: "port0",
            mmap: vec!["K1"],
            fmap: vec![],
            wmap: vec!["K2"],
        }]);
        let mut out = Vec::new();

        let summary = CoverageWalker::new(&api).run(&mut out).unwrap();

        assert_eq!(
            api.calls(),
            vec![
                Call::ReadValue("port0".into(), "K1".into()),
                Call::ReadValue("port0".into(), "K2".into()),
                Call::WriteValue("port0".into(), "K2".into(), Value::Str("port0:K2".into())),
            ]
        );
        assert_eq!(
            summary,
            WalkSummary {
                ports: 1,
                value_reads: 2,
                block_reads: 0,
                writes: 1,
            }
        );
        assert_eq!(output(out), "2 raw memory reads for port port0\n");
    }

    #[test]
    fn test_passes_run_in_order_without_dedup() {
        let api = MockApi::with_ports(vec![PortSetup {
            name: "p",
            mmap: vec!["B", "A"],
            fmap: vec!["F"],
            wmap: vec!["A"],
        }]);
        let mut out = Vec::new();

        CoverageWalker::new(&api).run(&mut out).unwrap();

        assert_eq!(
            api.calls(),
            vec![
                Call::ReadValue("p".into(), "A".into()),
                Call::ReadValue("p".into(), "B".into()),
                Call::ReadBlock("p".into(), "F".into()),
                Call::ReadValue("p".into(), "A".into()),
                Call::WriteValue("p".into(), "A".into(), Value::Str("p:A".into())),
            ]
        );
        assert_eq!(output(out), "4 raw memory reads for port p\n");
    }

    #[test]
    fn test_one_line_per_port_in_provider_order() {
        let api = MockApi::with_ports(vec![
            PortSetup {
                name: "port1",
                mmap: vec!["K1", "K2", "K3"],
                fmap: vec!["F1"],
                wmap: vec![],
            },
            PortSetup {
                name: "port0",
                mmap: vec![],
                fmap: vec![],
                wmap: vec![],
            },
        ]);
        let mut out = Vec::new();

        let summary = CoverageWalker::new(&api).run(&mut out).unwrap();

        assert_eq!(summary.ports, 2);
        assert_eq!(summary.block_reads, 1);
        assert_eq!(
            output(out),
            "4 raw memory reads for port port1\n0 raw memory reads for port port0\n"
        );
    }

    #[test]
    fn test_failure_stops_walk_immediately() {
        let mut api = MockApi::with_ports(vec![
            PortSetup {
                name: "port0",
                mmap: vec!["K1", "K2", "K3"],
                fmap: vec!["F1"],
                wmap: vec![],
            },
            PortSetup {
                name: "port1",
                mmap: vec!["K1"],
                fmap: vec![],
                wmap: vec![],
            },
        ]);
        api.fail_on = Some(("port0", "K2"));
        let mut out = Vec::new();

        let err = CoverageWalker::new(&api).run(&mut out).unwrap_err();

        assert!(matches!(err, OomError::Transport(_)));
        assert_eq!(
            api.calls(),
            vec![
                Call::ReadValue("port0".into(), "K1".into()),
                Call::ReadValue("port0".into(), "K2".into()),
            ]
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_lines_before_failure_remain() {
        let mut api = MockApi::with_ports(vec![
            PortSetup {
                name: "port0",
                mmap: vec!["K1"],
                fmap: vec![],
                wmap: vec![],
            },
            PortSetup {
                name: "port1",
                mmap: vec![],
                fmap: vec!["F1"],
                wmap: vec![],
            },
        ]);
        api.fail_on = Some(("port1", "F1"));
        let mut out = Vec::new();

        assert!(CoverageWalker::new(&api).run(&mut out).is_err());
        assert_eq!(output(out), "1 raw memory reads for port port0\n");
    }

    #[test]
    fn test_failing_write_back_read_skips_write() {
        let mut api = MockApi::with_ports(vec![PortSetup {
            name: "port0",
            mmap: vec![],
            fmap: vec![],
            wmap: vec!["W"],
        }]);
        api.fail_on = Some(("port0", "W"));
        let mut out = Vec::new();

        assert!(CoverageWalker::new(&api).run(&mut out).is_err());
        assert_eq!(
            api.calls(),
            vec![Call::ReadValue("port0".into(), "W".into())]
        );
    }

    #[test]
    fn test_list_ports_failure_propagates() {
        let api = MockApi {
            fail_list: true,
            ..Default::default()
        };
        let mut out = Vec::new();

        let err = CoverageWalker::new(&api).run(&mut out).unwrap_err();
        assert!(matches!(err, OomError::Transport(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_walker_over_trait_object() {
        let api = MockApi::with_ports(vec![PortSetup {
            name: "port0",
            mmap: vec!["K1"],
            fmap: vec![],
            wmap: vec![],
        }]);
        let dyn_api: &dyn OomApi = &api;
        let mut out = Vec::new();

        CoverageWalker::new(dyn_api).run(&mut out).unwrap();
        assert_eq!(output(out), "1 raw memory reads for port port0\n");
    }

    #[test]
    fn test_diagnostic_line_reports_current_readcount() {
        let port = Port::new("port3", PortType::Qsfp);
        assert_eq!(diagnostic_line(&port), "0 raw memory reads for port port3");
        port.record_read();
        port.record_read();
        assert_eq!(diagnostic_line(&port), "2 raw memory reads for port port3");
    }
}
