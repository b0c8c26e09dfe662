//! Built-in resource schemas for the supported providers.

use stratum_common::constants::{CIDR_BLOCK_KEY, CIDR_KEY, REGION_TYPE, SUBNET_TYPE, VPC_TYPE};

use super::{FieldSpec, FieldType, ResourceSchema};

/// Every built-in schema, AWS first.
#[must_use]
pub fn builtin_schemas() -> Vec<ResourceSchema> {
    let mut schemas = aws();
    schemas.extend(gcp());
    schemas.extend(azure());
    schemas
}

fn aws() -> Vec<ResourceSchema> {
    vec![
        ResourceSchema::new("aws", VPC_TYPE)
            .describe("Virtual Private Cloud")
            .field(FieldSpec::required(CIDR_KEY, FieldType::Cidr).alias(CIDR_BLOCK_KEY))
            .field(FieldSpec::optional("enable_dns_hostnames", FieldType::Boolean))
            .field(FieldSpec::optional("enable_dns_support", FieldType::Boolean))
            .field(FieldSpec::optional("instance_tenancy", FieldType::String).one_of(["default", "dedicated"]))
            .parents(&[REGION_TYPE])
            .children(&[SUBNET_TYPE, "security_group", "internet_gateway", "load_balancer"]),
        ResourceSchema::new("aws", SUBNET_TYPE)
            .describe("VPC subnet")
            .field(FieldSpec::required(CIDR_KEY, FieldType::Cidr).alias(CIDR_BLOCK_KEY))
            .field(FieldSpec::optional("availability_zone", FieldType::String).pattern(r"^[a-z]{2}-[a-z]+-\d[a-z]$"))
            .field(FieldSpec::optional("map_public_ip_on_launch", FieldType::Boolean))
            .parents(&[VPC_TYPE])
            .children(&["ec2", "rds", "lambda", "nat_gateway"]),
        ResourceSchema::new("aws", "ec2")
            .describe("EC2 instance")
            .field(FieldSpec::required("instance_type", FieldType::String).pattern(r"^[a-z][a-z0-9-]*\.[a-z0-9]+$"))
            .field(FieldSpec::optional("ami", FieldType::String).prefix("ami-"))
            .field(FieldSpec::optional("key_name", FieldType::String).length(Some(1), Some(255)))
            .field(FieldSpec::optional("root_volume_size", FieldType::Integer).range(Some(8.0), Some(16_384.0)))
            .parents(&[SUBNET_TYPE]),
        ResourceSchema::new("aws", "rds")
            .describe("RDS database instance")
            .field(FieldSpec::required("engine", FieldType::String).one_of([
                "postgres",
                "mysql",
                "mariadb",
                "aurora-postgresql",
                "aurora-mysql",
            ]))
            .field(FieldSpec::optional("instance_class", FieldType::String).prefix("db."))
            .field(FieldSpec::optional("allocated_storage", FieldType::Integer).range(Some(20.0), Some(65_536.0)))
            .field(FieldSpec::optional("multi_az", FieldType::Boolean))
            .parents(&[SUBNET_TYPE, VPC_TYPE]),
        ResourceSchema::new("aws", "s3")
            .describe("S3 bucket")
            .field(
                FieldSpec::required("bucket_name", FieldType::String)
                    .length(Some(3), Some(63))
                    .pattern(r"^[a-z0-9][a-z0-9.-]*[a-z0-9]$"),
            )
            .field(FieldSpec::optional("versioning", FieldType::Boolean))
            .parents(&[REGION_TYPE]),
        ResourceSchema::new("aws", "lambda")
            .describe("Lambda function")
            .field(FieldSpec::required("runtime", FieldType::String).one_of([
                "nodejs20.x",
                "python3.12",
                "java21",
                "go1.x",
                "provided.al2023",
            ]))
            .field(FieldSpec::optional("handler", FieldType::String).length(Some(1), Some(128)))
            .field(FieldSpec::optional("memory_size", FieldType::Integer).range(Some(128.0), Some(10_240.0)))
            .field(FieldSpec::optional("timeout", FieldType::Integer).range(Some(1.0), Some(900.0)))
            .parents(&[REGION_TYPE, SUBNET_TYPE]),
        ResourceSchema::new("aws", "security_group")
            .describe("Security group")
            .field(FieldSpec::optional("name", FieldType::String).length(Some(1), Some(255)))
            .field(FieldSpec::optional("ingress", FieldType::Array))
            .field(FieldSpec::optional("egress", FieldType::Array))
            .parents(&[VPC_TYPE]),
        ResourceSchema::new("aws", "internet_gateway")
            .describe("Internet gateway")
            .parents(&[VPC_TYPE]),
        ResourceSchema::new("aws", "nat_gateway")
            .describe("NAT gateway")
            .field(FieldSpec::optional("connectivity_type", FieldType::String).one_of(["public", "private"]))
            .parents(&[SUBNET_TYPE]),
        ResourceSchema::new("aws", "load_balancer")
            .describe("Elastic load balancer")
            .field(FieldSpec::optional("load_balancer_type", FieldType::String).one_of(["application", "network", "gateway"]))
            .field(FieldSpec::optional("internal", FieldType::Boolean))
            .field(FieldSpec::optional("subnets", FieldType::Array).length(Some(1), None))
            .parents(&[VPC_TYPE]),
    ]
}

fn gcp() -> Vec<ResourceSchema> {
    vec![
        ResourceSchema::new("gcp", VPC_TYPE)
            .describe("VPC network")
            .field(FieldSpec::optional("auto_create_subnetworks", FieldType::Boolean))
            .field(FieldSpec::optional("routing_mode", FieldType::String).one_of(["REGIONAL", "GLOBAL"]))
            .parents(&[REGION_TYPE])
            .children(&[SUBNET_TYPE, "firewall"]),
        ResourceSchema::new("gcp", SUBNET_TYPE)
            .describe("VPC subnetwork")
            .field(FieldSpec::required(CIDR_KEY, FieldType::Cidr).alias(CIDR_BLOCK_KEY))
            .field(FieldSpec::optional("private_ip_google_access", FieldType::Boolean))
            .parents(&[VPC_TYPE]),
        ResourceSchema::new("gcp", "compute_instance")
            .describe("Compute Engine instance")
            .field(FieldSpec::required("machine_type", FieldType::String).pattern(r"^[a-z0-9]+-[a-z0-9-]+$"))
            .field(FieldSpec::optional("zone", FieldType::String).pattern(r"^[a-z]+-[a-z]+\d-[a-z]$"))
            .parents(&[SUBNET_TYPE]),
        ResourceSchema::new("gcp", "cloud_sql")
            .describe("Cloud SQL instance")
            .field(FieldSpec::required("database_version", FieldType::String).pattern(r"^(POSTGRES|MYSQL|SQLSERVER)_"))
            .field(FieldSpec::optional("tier", FieldType::String).prefix("db-"))
            .parents(&[REGION_TYPE, VPC_TYPE]),
        ResourceSchema::new("gcp", "gcs_bucket")
            .describe("Cloud Storage bucket")
            .field(FieldSpec::required("bucket_name", FieldType::String).length(Some(3), Some(63)))
            .field(FieldSpec::optional("storage_class", FieldType::String).one_of(["STANDARD", "NEARLINE", "COLDLINE", "ARCHIVE"]))
            .parents(&[REGION_TYPE]),
        ResourceSchema::new("gcp", "firewall")
            .describe("VPC firewall rule")
            .field(FieldSpec::optional("direction", FieldType::String).one_of(["INGRESS", "EGRESS"]))
            .field(FieldSpec::optional("priority", FieldType::Integer).range(Some(0.0), Some(65_535.0)))
            .parents(&[VPC_TYPE]),
    ]
}

fn azure() -> Vec<ResourceSchema> {
    vec![
        ResourceSchema::new("azure", VPC_TYPE)
            .describe("Virtual network")
            .field(FieldSpec::required(CIDR_KEY, FieldType::Cidr).alias(CIDR_BLOCK_KEY))
            .parents(&[REGION_TYPE])
            .children(&[SUBNET_TYPE, "nsg"]),
        ResourceSchema::new("azure", SUBNET_TYPE)
            .describe("Virtual network subnet")
            .field(FieldSpec::required(CIDR_KEY, FieldType::Cidr).alias(CIDR_BLOCK_KEY))
            .parents(&[VPC_TYPE]),
        ResourceSchema::new("azure", "vm")
            .describe("Virtual machine")
            .field(FieldSpec::required("vm_size", FieldType::String).prefix("Standard_"))
            .field(FieldSpec::optional("admin_username", FieldType::String).length(Some(1), Some(64)))
            .parents(&[SUBNET_TYPE]),
        ResourceSchema::new("azure", "sql_database")
            .describe("Azure SQL database")
            .field(FieldSpec::optional("sku_name", FieldType::String))
            .field(FieldSpec::optional("max_size_gb", FieldType::Integer).range(Some(1.0), Some(4_096.0)))
            .parents(&[REGION_TYPE, VPC_TYPE]),
        ResourceSchema::new("azure", "storage_account")
            .describe("Storage account")
            .field(
                FieldSpec::required("account_name", FieldType::String)
                    .length(Some(3), Some(24))
                    .pattern(r"^[a-z0-9]+$"),
            )
            .field(FieldSpec::optional("account_tier", FieldType::String).one_of(["Standard", "Premium"]))
            .parents(&[REGION_TYPE]),
        ResourceSchema::new("azure", "nsg")
            .describe("Network security group")
            .field(FieldSpec::optional("security_rules", FieldType::Array))
            .parents(&[VPC_TYPE, SUBNET_TYPE]),
    ]
}
