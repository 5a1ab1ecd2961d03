#![allow(dead_code)]

use mux::config::{CommandBlock, CommandSet};

/// Builder for `CommandSet` to simplify test setup.
pub struct CommandSetBuilder {
    blocks: Vec<CommandBlock>,
}

impl CommandSetBuilder {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    pub fn with_command(mut self, block: CommandBlock) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn build(self) -> CommandSet {
        CommandSet::from_blocks(self.blocks)
    }
}

impl Default for CommandSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `CommandBlock`.
pub struct CommandBuilder {
    block: CommandBlock,
}

impl CommandBuilder {
    pub fn new(executable: &str) -> Self {
        Self {
            block: CommandBlock {
                executable: executable.to_string(),
                ..CommandBlock::default()
            },
        }
    }

    /// `sh -c <script>`.
    pub fn shell(script: &str) -> Self {
        Self::new("sh").arg("-c").arg(script)
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.block.args.push(arg.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.block.name = Some(name.to_string());
        self
    }

    pub fn exit(mut self, code: i32) -> Self {
        self.block.exit_code = Some(code);
        self
    }

    pub fn build(self) -> CommandBlock {
        self.block
    }
}
