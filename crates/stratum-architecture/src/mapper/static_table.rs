//! Static IR-type tables used when no provider resolver claims a type.

use stratum_common::types::CloudProvider;

use crate::domain::{ResourceCategory, ResourceType};

/// Static entries are all regional; the canonical id is the IR type.
struct Entry {
    ir_type: &'static str,
    name: &'static str,
    category: ResourceCategory,
    kind: &'static str,
}

const fn regional(
    ir_type: &'static str,
    name: &'static str,
    category: ResourceCategory,
    kind: &'static str,
) -> Entry {
    Entry {
        ir_type,
        name,
        category,
        kind,
    }
}

const AWS: &[Entry] = &[
    regional("vpc", "VPC", ResourceCategory::Networking, "aws_vpc"),
    regional("subnet", "Subnet", ResourceCategory::Networking, "aws_subnet"),
    regional("internet_gateway", "Internet Gateway", ResourceCategory::Networking, "aws_internet_gateway"),
    regional("nat_gateway", "NAT Gateway", ResourceCategory::Networking, "aws_nat_gateway"),
    regional("load_balancer", "Load Balancer", ResourceCategory::Networking, "aws_lb"),
    regional("security_group", "Security Group", ResourceCategory::Security, "aws_security_group"),
    regional("ec2", "EC2 Instance", ResourceCategory::Compute, "aws_instance"),
    regional("lambda", "Lambda Function", ResourceCategory::Compute, "aws_lambda_function"),
    regional("rds", "RDS Instance", ResourceCategory::Database, "aws_db_instance"),
    regional("s3", "S3 Bucket", ResourceCategory::Storage, "aws_s3_bucket"),
];

const GCP: &[Entry] = &[
    regional("vpc", "VPC Network", ResourceCategory::Networking, "google_compute_network"),
    regional("subnet", "Subnetwork", ResourceCategory::Networking, "google_compute_subnetwork"),
    regional("firewall", "Firewall Rule", ResourceCategory::Security, "google_compute_firewall"),
    regional("compute_instance", "Compute Instance", ResourceCategory::Compute, "google_compute_instance"),
    regional("cloud_sql", "Cloud SQL Instance", ResourceCategory::Database, "google_sql_database_instance"),
    regional("gcs_bucket", "Storage Bucket", ResourceCategory::Storage, "google_storage_bucket"),
];

const AZURE: &[Entry] = &[
    regional("vpc", "Virtual Network", ResourceCategory::Networking, "azurerm_virtual_network"),
    regional("subnet", "Subnet", ResourceCategory::Networking, "azurerm_subnet"),
    regional("nsg", "Network Security Group", ResourceCategory::Security, "azurerm_network_security_group"),
    regional("vm", "Virtual Machine", ResourceCategory::Compute, "azurerm_linux_virtual_machine"),
    regional("sql_database", "SQL Database", ResourceCategory::Database, "azurerm_mssql_database"),
    regional("storage_account", "Storage Account", ResourceCategory::Storage, "azurerm_storage_account"),
];

const fn table(provider: CloudProvider) -> &'static [Entry] {
    match provider {
        CloudProvider::Aws => AWS,
        CloudProvider::Gcp => GCP,
        CloudProvider::Azure => AZURE,
    }
}

/// Resolves an IR type from the provider's static table.
#[must_use]
pub fn lookup(provider: CloudProvider, ir_type: &str) -> Option<ResourceType> {
    table(provider)
        .iter()
        .find(|e| e.ir_type == ir_type)
        .map(|e| ResourceType::regional(e.ir_type, e.name, e.category, e.kind))
}

/// Every IR type the static table knows for a provider.
#[must_use]
pub fn ir_types(provider: CloudProvider) -> Vec<&'static str> {
    table(provider).iter().map(|e| e.ir_type).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_tables_are_separate() {
        let aws = lookup(CloudProvider::Aws, "vpc").expect("aws vpc");
        let gcp = lookup(CloudProvider::Gcp, "vpc").expect("gcp vpc");
        assert_eq!(aws.kind, "aws_vpc");
        assert_eq!(gcp.kind, "google_compute_network");
        assert!(lookup(CloudProvider::Gcp, "ec2").is_none());
    }

    #[test]
    fn region_is_never_a_resource_type() {
        for provider in CloudProvider::ALL {
            assert!(lookup(provider, "region").is_none());
        }
    }

    #[test]
    fn tables_have_unique_ir_types() {
        for provider in CloudProvider::ALL {
            let mut types = ir_types(provider);
            let before = types.len();
            types.sort_unstable();
            types.dedup();
            assert_eq!(types.len(), before, "duplicate in {provider}");
        }
    }
}
