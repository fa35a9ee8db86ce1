//! Security Groups and their rules

use crate::client::Client;
use nimbus_api::{Command, Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A Security Group.
#[derive(Debug, Clone, Default)]
pub struct SecurityGroup {
    pub id: String,
    pub name: String,
    pub description: String,

    client: Option<Client>,
}

/// Traffic direction of a Security Group rule.
///
/// The remote API reports ingress and egress rules with one shared shape,
/// distinguished only by which list they appear in; the binder stamps the
/// direction explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleDirection {
    Ingress,
    Egress,
}

impl RuleDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleDirection::Ingress => "ingress",
            RuleDirection::Egress => "egress",
        }
    }
}

impl fmt::Display for RuleDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Security Group rule.
///
/// Either `network_cidr` or `security_group` (a peer Security Group used
/// as traffic source/destination) is set, matching the remote rule shape.
#[derive(Debug, Clone, Default)]
pub struct SecurityGroupRule {
    pub id: String,
    pub direction: Option<RuleDirection>,
    pub description: String,
    pub network_cidr: String,
    pub security_group: Option<Box<SecurityGroup>>,
    pub port: String,
    pub protocol: String,
    pub icmp_type: u8,
    pub icmp_code: u8,

    client: Option<Client>,
}

impl SecurityGroup {
    /// List this group's ingress rules.
    pub async fn ingress_rules(&self) -> Result<Vec<SecurityGroupRule>> {
        self.rules(RuleDirection::Ingress).await
    }

    /// List this group's egress rules.
    pub async fn egress_rules(&self) -> Result<Vec<SecurityGroupRule>> {
        self.rules(RuleDirection::Egress).await
    }

    async fn rules(&self, direction: RuleDirection) -> Result<Vec<SecurityGroupRule>> {
        let client = self.client.as_ref().ok_or(Error::AlreadyDeleted)?;

        let res = nimbus_api::list(
            &*client.bus,
            &ListSecurityGroups {
                id: String::new(),
                name: self.name.clone(),
            },
        )
        .await?;

        let mut rules = Vec::new();
        for item in res {
            let sg: ApiSecurityGroup = serde_json::from_value(item)?;
            let raw = match direction {
                RuleDirection::Ingress => sg.ingress_rules,
                RuleDirection::Egress => sg.egress_rules,
            };
            for rule in raw {
                rules.push(client.security_group_rule_from_api(rule, direction).await?);
            }
        }

        Ok(rules)
    }

    /// Delete the Security Group.
    ///
    /// On success the value becomes a tombstone: every field is reset to
    /// its zero value and no further operation can be dispatched from it.
    /// On failure the value is left untouched.
    pub async fn delete(&mut self) -> Result<()> {
        let client = self.client.as_ref().ok_or(Error::AlreadyDeleted)?;

        client
            .boolean(&DeleteSecurityGroup {
                name: self.name.clone(),
            })
            .await?;

        *self = Self::default();

        Ok(())
    }
}

impl SecurityGroupRule {
    /// Delete the Security Group rule, tombstoning the value on success.
    pub async fn delete(&mut self) -> Result<()> {
        let client = self.client.as_ref().ok_or(Error::AlreadyDeleted)?;
        let direction = self.direction.ok_or(Error::AlreadyDeleted)?;

        match direction {
            RuleDirection::Ingress => {
                client
                    .boolean(&RevokeSecurityGroupIngress {
                        id: self.id.clone(),
                    })
                    .await?
            }
            RuleDirection::Egress => {
                client
                    .boolean(&RevokeSecurityGroupEgress {
                        id: self.id.clone(),
                    })
                    .await?
            }
        }

        *self = Self::default();

        Ok(())
    }
}

impl Client {
    /// Create a new Security Group identified by name.
    pub async fn create_security_group(
        &self,
        name: &str,
        description: &str,
    ) -> Result<SecurityGroup> {
        tracing::debug!(name, "creating security group");

        let res = nimbus_api::execute(
            &*self.bus,
            &CreateSecurityGroup {
                name: name.to_string(),
                description: description.to_string(),
            },
        )
        .await?;

        Ok(self.security_group_from_api(serde_json::from_value(res)?))
    }

    /// List all Security Groups.
    pub async fn list_security_groups(&self) -> Result<Vec<SecurityGroup>> {
        let res = nimbus_api::list(
            &*self.bus,
            &ListSecurityGroups {
                id: String::new(),
                name: String::new(),
            },
        )
        .await?;

        let mut groups = Vec::with_capacity(res.len());
        for item in res {
            groups.push(self.security_group_from_api(serde_json::from_value(item)?));
        }

        Ok(groups)
    }

    /// Look up a Security Group by name.
    pub async fn get_security_group_by_name(&self, name: &str) -> Result<SecurityGroup> {
        self.get_security_group("", name).await
    }

    /// Look up a Security Group by its unique identifier.
    pub async fn get_security_group_by_id(&self, id: &str) -> Result<SecurityGroup> {
        self.get_security_group(id, "").await
    }

    async fn get_security_group(&self, id: &str, name: &str) -> Result<SecurityGroup> {
        let res = nimbus_api::list(
            &*self.bus,
            &ListSecurityGroups {
                id: id.to_string(),
                name: name.to_string(),
            },
        )
        .await?;

        match res.into_iter().next() {
            Some(item) => Ok(self.security_group_from_api(serde_json::from_value(item)?)),
            None => Err(Error::ResourceNotFound),
        }
    }

    fn security_group_from_api(&self, sg: ApiSecurityGroup) -> SecurityGroup {
        SecurityGroup {
            id: sg.id,
            name: sg.name,
            description: sg.description,
            client: Some(self.clone()),
        }
    }

    pub(crate) async fn security_group_rule_from_api(
        &self,
        rule: ApiSecurityGroupRule,
        direction: RuleDirection,
    ) -> Result<SecurityGroupRule> {
        // A rule references either a plain CIDR or a peer Security Group;
        // the latter is resolved to a full entity.
        let security_group = if rule.security_group_name.is_empty() {
            None
        } else {
            Some(Box::new(
                self.get_security_group_by_name(&rule.security_group_name)
                    .await?,
            ))
        };

        let port = if rule.start_port > 0 {
            match rule.start_port.cmp(&rule.end_port) {
                Ordering::Equal => rule.start_port.to_string(),
                Ordering::Less => format!("{}-{}", rule.start_port, rule.end_port),
                Ordering::Greater => {
                    return Err(Error::InvalidResponse(format!(
                        "rule {}: start port {} greater than end port {}",
                        rule.rule_id, rule.start_port, rule.end_port
                    )));
                }
            }
        } else {
            String::new()
        };

        Ok(SecurityGroupRule {
            id: rule.rule_id,
            direction: Some(direction),
            description: rule.description,
            network_cidr: rule.cidr,
            security_group,
            port,
            protocol: rule.protocol,
            icmp_type: rule.icmp_type,
            icmp_code: rule.icmp_code,
            client: Some(self.clone()),
        })
    }
}

// ============ Wire types ============

#[derive(Debug, Deserialize)]
pub(crate) struct ApiSecurityGroup {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    ingress_rules: Vec<ApiSecurityGroupRule>,
    #[serde(default)]
    egress_rules: Vec<ApiSecurityGroupRule>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiSecurityGroupRule {
    rule_id: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    cidr: String,
    #[serde(default)]
    security_group_name: String,
    #[serde(default)]
    start_port: u16,
    #[serde(default)]
    end_port: u16,
    #[serde(default)]
    protocol: String,
    #[serde(default)]
    icmp_type: u8,
    #[serde(default)]
    icmp_code: u8,
}

#[derive(Debug, Serialize)]
struct CreateSecurityGroup {
    name: String,
    description: String,
}

impl Command for CreateSecurityGroup {
    const NAME: &'static str = "createSecurityGroup";
}

#[derive(Debug, Serialize)]
struct ListSecurityGroups {
    #[serde(skip_serializing_if = "String::is_empty")]
    id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    name: String,
}

impl Command for ListSecurityGroups {
    const NAME: &'static str = "listSecurityGroups";
}

#[derive(Debug, Serialize)]
struct DeleteSecurityGroup {
    name: String,
}

impl Command for DeleteSecurityGroup {
    const NAME: &'static str = "deleteSecurityGroup";
}

#[derive(Debug, Serialize)]
struct RevokeSecurityGroupIngress {
    id: String,
}

impl Command for RevokeSecurityGroupIngress {
    const NAME: &'static str = "revokeSecurityGroupIngress";
}

#[derive(Debug, Serialize)]
struct RevokeSecurityGroupEgress {
    id: String,
}

impl Command for RevokeSecurityGroupEgress {
    const NAME: &'static str = "revokeSecurityGroupEgress";
}
