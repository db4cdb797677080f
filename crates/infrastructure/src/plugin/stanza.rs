use crate::host::Dispenser;
use clusterset_dns_domain::{ClusterAccess, DomainError, MultiClusterConfig, Zones};

/// Parses one `multicluster` block.
///
/// Zones on the plugin line override the server block keys. Endpoints are
/// watched unless `noendpoints` is given. Stops at the first error.
pub fn parse_stanza(
    dispenser: &mut Dispenser,
    server_block_keys: &[String],
) -> Result<MultiClusterConfig, DomainError> {
    dispenser.next();

    let args = dispenser.remaining_args();
    let mut config = MultiClusterConfig::new(Zones::from_args_or_server_block(
        &args,
        server_block_keys,
    ));

    while dispenser.next_block()? {
        match dispenser.val() {
            "kubeconfig" => {
                let args = dispenser.remaining_args();
                if args.len() != 1 && args.len() != 2 {
                    return Err(dispenser.arg_err());
                }
                config.client_config = Some(ClusterAccess::kubeconfig(
                    args[0].clone(),
                    args.get(1).cloned(),
                ));
            }
            "fallthrough" => {
                let args = dispenser.remaining_args();
                config.fallthrough.set_zones_from_args(&args);
            }
            "noendpoints" => {
                if !dispenser.remaining_args().is_empty() {
                    return Err(dispenser.arg_err());
                }
                config.watch_endpoints = false;
            }
            property => {
                return Err(DomainError::UnknownProperty {
                    property: property.to_string(),
                    line: dispenser.line(),
                });
            }
        }
    }

    Ok(config)
}
